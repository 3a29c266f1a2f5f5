// file: src/config.rs
// version: 2.0.0
// guid: 6ea31d79-e2bf-4304-a841-22bf1e595512

use crate::error::Result;
use crate::format::LogFormat;
use crate::level::LevelValue;
use crate::logging::{Logger, Registry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default size at which a log file is rotated (10 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated files kept
pub const DEFAULT_BACKUP_COUNT: u32 = 5;

/// Key in [`LoggingConfig::loggers`] that names the root logger
pub const ROOT_KEY: &str = "root";

/// Options applied the first time a logger is configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    pub level: LevelValue,
    pub file: Option<PathBuf>,
    pub format: LogFormat,
    pub max_bytes: u64,
    pub backup_count: u32,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: LevelValue::default(),
            file: None,
            format: LogFormat::Text,
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
        }
    }
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the threshold from a level, numeric code or name
    pub fn with_level(mut self, level: impl Into<LevelValue>) -> Self {
        self.level = level.into();
        self
    }

    /// Also log to this file; relative paths are resolved against the project root
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_backup_count(mut self, backup_count: u32) -> Self {
        self.backup_count = backup_count;
        self
    }
}

/// A set of named logger configurations, usually read from TOML:
///
/// ```toml
/// [loggers.root]
/// level = "WARNING"
///
/// [loggers.svc]
/// level = 10
/// format = "json"
/// file = "logs/svc.log"
/// max_bytes = 1048576
/// backup_count = 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub loggers: BTreeMap<String, LoggerOptions>,
}

impl LoggingConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        info!(
            "Loaded logging configuration from {} ({} loggers)",
            path.as_ref().display(),
            config.loggers.len()
        );
        Ok(config)
    }

    /// Configure every listed logger in `registry`, stopping at the first failure
    pub fn apply(&self, registry: &Registry) -> Result<Vec<Logger>> {
        self.loggers
            .iter()
            .map(|(name, options)| {
                let name = if name == ROOT_KEY { None } else { Some(name.as_str()) };
                registry.get_logger(name, options)
            })
            .collect()
    }
}
