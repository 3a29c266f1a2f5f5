// file: src/macros.rs
// version: 1.0.0
// guid: b7c3e95a-1d24-4f6b-a8e0-5f92d4c16b38

//! Emit macros that record the call site (module, function and line)
//!
//! ```
//! use log_factory::{get_logger, log_info, log_error, LoggerOptions};
//!
//! let logger = get_logger(Some("svc"), &LoggerOptions::default()).unwrap();
//! log_info!(logger, "started on port {}", 8080);
//! log_info!(logger, extra = { "request_id" => "abc" }, "handled request");
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! log_error!(logger, error = &err, "could not write tile");
//! ```

/// Emit an event at an explicit level.
///
/// Extra values that fail to serialize are reported on stderr instead of
/// being logged.
#[macro_export]
macro_rules! log_event {
    ($logger:expr, $level:expr, extra = { $($key:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::Level = $level;
        if logger.is_enabled_for(level) {
            let record = $crate::Record::new(level, ::std::format!($($arg)+))
                .with_location(::std::module_path!(), $crate::__function_name!(), ::std::line!());
            let record = ::std::result::Result::Ok::<$crate::Record, $crate::LogError>(record)
                $(.and_then(|record| record.with_extra($key, &$value)))*;
            logger.log_result(record);
        }
    }};
    ($logger:expr, $level:expr, error = $err:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::Level = $level;
        if logger.is_enabled_for(level) {
            let record = $crate::Record::new(level, ::std::format!($($arg)+))
                .with_location(::std::module_path!(), $crate::__function_name!(), ::std::line!())
                .with_error($err);
            logger.log(record);
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::Level = $level;
        if logger.is_enabled_for(level) {
            let record = $crate::Record::new(level, ::std::format!($($arg)+))
                .with_location(::std::module_path!(), $crate::__function_name!(), ::std::line!());
            logger.log(record);
        }
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_event!($logger, $crate::Level::Debug, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_event!($logger, $crate::Level::Info, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_event!($logger, $crate::Level::Warning, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_event!($logger, $crate::Level::Error, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log_event!($logger, $crate::Level::Critical, $($rest)+)
    };
}
