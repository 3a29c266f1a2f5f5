// file: src/logging/registry.rs
// version: 1.0.0
// guid: 2c9e7a14-b6f3-4d08-95a1-e4f7c3d8b062

//! Process-wide registry of named loggers and the configuring factory
//!
//! The first call to [`Registry::get_logger`] for a name attaches sinks; every
//! later call returns the same logger and ignores its options.

use super::logger::Logger;
use crate::config::LoggerOptions;
use crate::error::Result;
use crate::format::Formatter;
use crate::sink::{ConsoleSink, RotatingFileSink, Sink};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::debug;

pub(crate) type LoggerMap = Mutex<HashMap<String, Logger>>;

/// Registry of loggers keyed by name; the empty name is the root logger
pub struct Registry {
    loggers: Arc<LoggerMap>,
    project_root: PathBuf,
}

impl Registry {
    /// Create an empty registry anchored at the crate's project root
    pub fn new() -> Self {
        Self::with_project_root(default_project_root())
    }

    /// Create an empty registry resolving relative log paths against `root`
    pub fn with_project_root(root: impl Into<PathBuf>) -> Self {
        Self {
            loggers: Arc::new(Mutex::new(HashMap::new())),
            project_root: root.into(),
        }
    }

    /// The process-wide registry
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve a log file path; relative paths are taken from the project root
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Look up or create a logger without configuring it
    pub fn logger(&self, name: Option<&str>) -> Logger {
        let mut loggers = self.lock();
        self.entry(&mut loggers, name.unwrap_or(""))
    }

    /// Whether a logger with this name has been created
    pub fn contains(&self, name: Option<&str>) -> bool {
        self.lock().contains_key(name.unwrap_or(""))
    }

    /// Get a logger, configuring it on first use.
    ///
    /// If the logger already has sinks it is returned untouched. Otherwise
    /// its threshold is set, a console sink and (when `options.file` is set)
    /// a rotating file sink are attached, and propagation is switched off.
    /// A failure leaves the logger without sinks.
    pub fn get_logger(&self, name: Option<&str>, options: &LoggerOptions) -> Result<Logger> {
        let mut loggers = self.lock();
        let logger = self.entry(&mut loggers, name.unwrap_or(""));
        if logger.has_sinks() {
            return Ok(logger);
        }

        let level = options.level.resolve()?;
        let formatter = Formatter::new(options.format);
        let mut sinks: Vec<Arc<dyn Sink>> = vec![Arc::new(ConsoleSink::stderr(formatter))];

        let file = match options.file.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => {
                let resolved = self.resolve_path(path);
                if let Some(parent) = resolved.parent() {
                    fs::create_dir_all(parent)?;
                }
                sinks.push(Arc::new(RotatingFileSink::open(
                    &resolved,
                    options.max_bytes,
                    options.backup_count,
                    formatter,
                )?));
                Some(resolved)
            }
            _ => None,
        };

        logger.configure(sinks, level, false);
        drop(loggers);

        debug!(
            logger = logger.display_name(),
            level = %level,
            format = %options.format,
            file = ?file,
            "Configured logger"
        );
        Ok(logger)
    }

    fn entry(&self, loggers: &mut HashMap<String, Logger>, name: &str) -> Logger {
        loggers
            .entry(name.to_string())
            .or_insert_with(|| Logger::with_registry(name.to_string(), Arc::downgrade(&self.loggers)))
            .clone()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Logger>> {
        self.loggers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Directory that relative log paths are resolved against by default
pub fn default_project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Name of the next registered ancestor candidate: `a.b.c` -> `a.b` -> `a` -> root
pub(crate) fn parent_name(name: &str) -> Option<&str> {
    if name.is_empty() {
        return None;
    }
    match name.rsplit_once('.') {
        Some((parent, _)) => Some(parent),
        None => Some(""),
    }
}

/// Get a logger from the global registry, configuring it on first use
pub fn get_logger(name: Option<&str>, options: &LoggerOptions) -> Result<Logger> {
    Registry::global().get_logger(name, options)
}

/// The root logger of the global registry.
///
/// The first call configures it through the factory with default options,
/// unless an earlier [`get_logger`] call for the root already did.
pub fn root_logger() -> Result<Logger> {
    get_logger(None, &LoggerOptions::default())
}
