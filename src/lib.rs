// file: src/lib.rs
// version: 3.0.0
// guid: d82472d1-7f0f-4eb4-b0a3-6e1547103eb4

//! # Log Factory
//!
//! Named loggers that write human-readable text or structured JSON lines to
//! the console and, optionally, to a size-rotated file.
//!
//! A logger is configured the first time it is requested by name; later
//! requests return the same logger and ignore their options.
//!
//! ```no_run
//! use log_factory::{get_logger, log_info, LogFormat, LoggerOptions};
//!
//! let options = LoggerOptions::new()
//!     .with_level("DEBUG")
//!     .with_format(LogFormat::Json)
//!     .with_file("logs/app.log");
//! let logger = get_logger(Some("svc"), &options)?;
//! log_info!(logger, extra = { "request_id" => "abc" }, "started");
//! # Ok::<(), log_factory::LogError>(())
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod level;
pub mod logging;
pub mod macros;
pub mod record;
pub mod sink;

#[cfg(test)]
mod test_support;

pub use config::{LoggerOptions, LoggingConfig};
pub use error::{LogError, Result};
pub use format::{Formatter, LogFormat};
pub use level::{Level, LevelValue};
pub use logging::{get_logger, root_logger, Logger, LoggerLayer, Registry};
pub use record::Record;

/// Version information for the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
