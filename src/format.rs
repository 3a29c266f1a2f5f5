// file: src/format.rs
// version: 1.0.0
// guid: 9d05b6c3-7e2a-4f81-b4c9-13e8a6f2d057

//! Rendering of records into text or JSON lines

use crate::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt;

/// Date format of text lines
pub const TEXT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format of the `timestamp` key in JSON lines (millisecond precision)
pub const JSON_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Output format selected when a logger is configured.
///
/// Parsing is lenient: `json` in any case selects JSON, anything else is text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Ok(LogFormat::Text)
        }
    }
}

impl From<&str> for LogFormat {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(format) => format,
            Err(never) => match never {},
        }
    }
}

impl From<String> for LogFormat {
    fn from(value: String) -> Self {
        LogFormat::from(value.as_str())
    }
}

impl From<LogFormat> for String {
    fn from(format: LogFormat) -> Self {
        format.as_str().to_string()
    }
}

/// Renders a record into a single line, chosen once per logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    Text,
    Json,
}

impl Formatter {
    pub fn new(format: LogFormat) -> Self {
        match format {
            LogFormat::Text => Formatter::Text,
            LogFormat::Json => Formatter::Json,
        }
    }

    /// Render the record without a trailing newline
    pub fn format(&self, record: &Record) -> String {
        match self {
            Formatter::Text => format_text(record),
            Formatter::Json => format_json(record),
        }
    }
}

fn format_text(record: &Record) -> String {
    let mut line = format!(
        "{} - {} - {} - {}",
        record.timestamp.format(TEXT_DATE_FORMAT),
        record.logger,
        record.level,
        record.message
    );
    if let Some(exception) = &record.exception {
        line.push('\n');
        line.push_str(exception);
    }
    line
}

fn format_json(record: &Record) -> String {
    let mut object = Map::new();
    object.insert(
        "timestamp".to_string(),
        Value::from(record.timestamp.format(JSON_DATE_FORMAT).to_string()),
    );
    object.insert("level".to_string(), Value::from(record.level.as_str()));
    object.insert("message".to_string(), Value::from(record.message.as_str()));
    object.insert("module".to_string(), Value::from(record.module.as_str()));
    object.insert("function".to_string(), Value::from(record.function.as_str()));
    object.insert("line".to_string(), Value::from(record.line));

    if let Some(exception) = &record.exception {
        object.insert("exception".to_string(), Value::from(exception.as_str()));
    }

    // Extras win on key collisions
    for (key, value) in &record.extra {
        object.insert(key.clone(), value.clone());
    }

    // A map of string keys and JSON values always serializes
    Value::Object(object).to_string()
}
