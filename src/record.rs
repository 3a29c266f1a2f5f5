// file: src/record.rs
// version: 1.0.0
// guid: c4a8e2f7-31b9-4d6e-8a05-f27d9c1e6b30

//! The log event handed from a logger to its sinks

use crate::error::Result;
use crate::level::Level;
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::fmt::Write as _;
use std::path::Path;

/// Function name used when the call site is not known
pub const UNKNOWN_FUNCTION: &str = "(unknown function)";

/// A single log event
#[derive(Debug, Clone)]
pub struct Record {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    /// Display name of the originating logger; filled in on emission when empty
    pub logger: String,
    pub message: String,
    pub module: String,
    pub function: String,
    pub line: u32,
    pub exception: Option<String>,
    pub extra: Map<String, Value>,
}

impl Record {
    /// Create a record stamped with the current local time
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            logger: String::new(),
            message: message.into(),
            module: String::new(),
            function: UNKNOWN_FUNCTION.to_string(),
            line: 0,
            exception: None,
            extra: Map::new(),
        }
    }

    /// Set the call-site location
    pub fn with_location(mut self, module: &str, function: &str, line: u32) -> Self {
        self.module = module.to_string();
        self.function = function.to_string();
        self.line = line;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attach pre-rendered exception text
    pub fn with_exception(mut self, text: impl Into<String>) -> Self {
        self.exception = Some(text.into());
        self
    }

    /// Attach an error and its source chain as exception text
    pub fn with_error(self, err: &(dyn StdError + 'static)) -> Self {
        let text = render_error_chain(err);
        self.with_exception(text)
    }

    /// Add one extra field.
    ///
    /// Fails with a serialization error if the value cannot be represented as JSON.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        self.extra.insert(key.into(), value);
        Ok(self)
    }

    /// Merge a whole map of extra fields, later keys replacing earlier ones
    pub fn with_extras(mut self, extras: Map<String, Value>) -> Self {
        self.extra.extend(extras);
        self
    }
}

/// Render an error followed by its numbered `source()` chain
pub fn render_error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    if source.is_some() {
        out.push_str("\n\nCaused by:");
    }
    let mut index = 0;
    while let Some(cause) = source {
        let _ = write!(out, "\n    {}: {}", index, cause);
        index += 1;
        source = cause.source();
    }
    out
}

/// Module name for a source file: its stem, e.g. `src/server.rs` -> `server`
pub fn module_from_file(file: &str) -> &str {
    Path::new(file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file)
}

/// Reduce a `type_name` path of a call-site marker fn to the enclosing function name
#[doc(hidden)]
pub fn short_function_name(marker_path: &str) -> &str {
    let mut path = marker_path.strip_suffix("::__here").unwrap_or(marker_path);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    match path.rsplit_once("::") {
        Some((_, name)) => name,
        None => path,
    }
}

/// Expands to the name of the enclosing function
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::record::short_function_name(type_name_of(__here))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Leaf;

    impl fmt::Display for Leaf {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("disk full")
        }
    }

    impl StdError for Leaf {}

    #[derive(Debug)]
    struct Outer(Leaf);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("failed to save tile")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_render_error_chain_with_source() {
        // Arrange
        let err = Outer(Leaf);

        // Act
        let text = render_error_chain(&err);

        // Assert
        assert_eq!(text, "failed to save tile\n\nCaused by:\n    0: disk full");
    }

    #[test]
    fn test_render_error_without_source() {
        assert_eq!(render_error_chain(&Leaf), "disk full");
    }

    #[test]
    fn test_with_extra_replaces_existing_key() {
        let record = Record::new(Level::Info, "hello")
            .with_extra("user", "a")
            .unwrap()
            .with_extra("user", "b")
            .unwrap();

        assert_eq!(record.extra.len(), 1);
        assert_eq!(record.extra["user"], Value::from("b"));
    }

    #[test]
    fn test_with_extra_rejects_unserializable_value() {
        use std::collections::HashMap;

        // Arrange: JSON object keys must be strings
        let mut map = HashMap::new();
        map.insert(vec![1u8], "x");

        // Act
        let result = Record::new(Level::Info, "hello").with_extra("bad", map);

        // Assert
        assert!(matches!(result, Err(crate::error::LogError::Serialization(_))));
    }

    #[test]
    fn test_module_from_file() {
        assert_eq!(module_from_file("src/logging/registry.rs"), "registry");
        assert_eq!(module_from_file("tests/integration_test.rs"), "integration_test");
        assert_eq!(module_from_file("main.rs"), "main");
    }

    #[test]
    fn test_short_function_name() {
        assert_eq!(short_function_name("my_crate::svc::start::__here"), "start");
        assert_eq!(
            short_function_name("my_crate::svc::start::{{closure}}::__here"),
            "start"
        );
        assert_eq!(short_function_name("main::__here"), "main");
    }

    #[test]
    fn test_function_name_macro() {
        let name = crate::__function_name!();
        assert_eq!(name, "test_function_name_macro");
    }
}
