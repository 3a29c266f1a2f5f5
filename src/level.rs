// file: src/level.rs
// version: 1.0.0
// guid: 7b2e4d91-05a3-4c8f-b6d2-9e13f0a47c58

//! Severity levels and the loose integer-or-name form accepted by the factory

use crate::error::{LogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a log event, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// Get the level as its upper-case display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Get the numeric severity code
    pub fn code(&self) -> i64 {
        match self {
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }

    /// Look up a level by its numeric severity code
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            10 => Ok(Level::Debug),
            20 => Ok(Level::Info),
            30 => Ok(Level::Warning),
            40 => Ok(Level::Error),
            50 => Ok(Level::Critical),
            _ => Err(LogError::config(format!("Unknown level code: {}", code))),
        }
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warning,
            3 => Level::Error,
            _ => Level::Critical,
        }
    }

    pub(crate) fn to_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" | "WARN" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" | "FATAL" => Ok(Level::Critical),
            _ => Err(LogError::config(format!("Unknown level: {}", s))),
        }
    }
}

/// A severity threshold as supplied by a caller: either a numeric code or a name.
///
/// Resolution into a [`Level`] happens at configuration time, so an unknown
/// value surfaces as a configuration error from the factory rather than here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelValue {
    Code(i64),
    Name(String),
}

impl LevelValue {
    /// Resolve into a concrete level
    pub fn resolve(&self) -> Result<Level> {
        match self {
            LevelValue::Code(code) => Level::from_code(*code),
            LevelValue::Name(name) => name.parse(),
        }
    }
}

impl Default for LevelValue {
    fn default() -> Self {
        LevelValue::Code(Level::Info.code())
    }
}

impl From<Level> for LevelValue {
    fn from(level: Level) -> Self {
        LevelValue::Code(level.code())
    }
}

impl From<i64> for LevelValue {
    fn from(code: i64) -> Self {
        LevelValue::Code(code)
    }
}

impl From<i32> for LevelValue {
    fn from(code: i32) -> Self {
        LevelValue::Code(i64::from(code))
    }
}

impl From<&str> for LevelValue {
    fn from(name: &str) -> Self {
        LevelValue::Name(name.to_string())
    }
}

impl From<String> for LevelValue {
    fn from(name: String) -> Self {
        LevelValue::Name(name)
    }
}
