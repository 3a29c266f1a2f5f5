// file: src/logging/logger.rs
// version: 2.0.0
// guid: j0k1l2m3-n4o5-6789-0123-456789jklmno

//! Named logger handles
//!
//! A [`Logger`] is a cheap, cloneable handle; all clones share one set of
//! sinks, one threshold and one propagation flag. Two handles compare equal
//! only when they refer to the same logger.

use super::registry::{parent_name, LoggerMap};
use crate::error::{LogError, Result};
use crate::level::Level;
use crate::record::{module_from_file, Record, UNKNOWN_FUNCTION};
use crate::sink::Sink;
use std::fmt;
use std::io;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

/// Display name of the logger registered under the empty name
pub const ROOT_NAME: &str = "root";

/// Threshold used when neither the logger nor any ancestor sets one
pub const DEFAULT_THRESHOLD: Level = Level::Warning;

const LEVEL_UNSET: u8 = u8::MAX;

/// Handle to a named logger
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    name: String,
    level: AtomicU8,
    propagate: AtomicBool,
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
    registry: Weak<LoggerMap>,
}

impl Logger {
    /// Create a detached logger with no sinks, no threshold of its own and propagation on.
    ///
    /// Loggers obtained through a registry also know their ancestors, and
    /// inherit the nearest ancestor threshold until one is set.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_registry(name.into(), Weak::new())
    }

    pub(crate) fn with_registry(name: String, registry: Weak<LoggerMap>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                name,
                level: AtomicU8::new(LEVEL_UNSET),
                propagate: AtomicBool::new(true),
                sinks: RwLock::new(Vec::new()),
                registry,
            }),
        }
    }

    /// Registered name; empty for the root logger
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Name as printed in log lines
    pub fn display_name(&self) -> &str {
        if self.inner.name.is_empty() {
            ROOT_NAME
        } else {
            &self.inner.name
        }
    }

    pub fn is_root(&self) -> bool {
        self.inner.name.is_empty()
    }

    /// Effective threshold: this logger's own, else the nearest ancestor's, else WARNING
    pub fn level(&self) -> Level {
        if let Some(level) = self.explicit_level() {
            return level;
        }
        self.ancestors()
            .iter()
            .find_map(Logger::explicit_level)
            .unwrap_or(DEFAULT_THRESHOLD)
    }

    /// Threshold set on this logger itself, if any
    pub fn explicit_level(&self) -> Option<Level> {
        match self.inner.level.load(Ordering::Relaxed) {
            LEVEL_UNSET => None,
            raw => Some(Level::from_u8(raw)),
        }
    }

    pub fn set_level(&self, level: Level) {
        self.inner.level.store(level.to_u8(), Ordering::Relaxed);
    }

    /// Whether an event at `level` passes this logger's threshold
    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.level()
    }

    pub fn propagate(&self) -> bool {
        self.inner.propagate.load(Ordering::Relaxed)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.inner.propagate.store(propagate, Ordering::Relaxed);
    }

    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.write_sinks().push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.read_sinks().len()
    }

    pub fn has_sinks(&self) -> bool {
        self.sink_count() > 0
    }

    /// Emit a record, reporting sink failures on stderr and carrying on
    pub fn log(&self, record: Record) {
        self.dispatch(record, &mut |err: io::Error| report_error(&err));
    }

    /// Emit a record, returning the first sink failure.
    ///
    /// Remaining sinks are still written after a failure.
    pub fn try_log(&self, record: Record) -> Result<()> {
        let mut first = None;
        self.dispatch(record, &mut |err: io::Error| {
            if first.is_none() {
                first = Some(err);
            }
        });
        match first {
            Some(err) => Err(LogError::Io(err)),
            None => Ok(()),
        }
    }

    /// Emit a record that may have failed to build, reporting the failure otherwise
    pub fn log_result(&self, record: Result<Record>) {
        match record {
            Ok(record) => self.log(record),
            Err(err) => report_error(&err),
        }
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warning, args);
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    #[track_caller]
    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Critical, args);
    }

    /// Flush every sink attached to this logger
    pub fn flush(&self) -> Result<()> {
        for sink in self.read_sinks().iter() {
            sink.flush()?;
        }
        Ok(())
    }

    #[track_caller]
    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let caller = Location::caller();
        if self.is_enabled_for(level) {
            let record = Record::new(level, args.to_string()).with_location(
                module_from_file(caller.file()),
                UNKNOWN_FUNCTION,
                caller.line(),
            );
            self.log(record);
        }
    }

    /// Attach sinks and settings in one step; used by the factory
    pub(crate) fn configure(&self, sinks: Vec<Arc<dyn Sink>>, level: Level, propagate: bool) {
        self.write_sinks().extend(sinks);
        self.set_level(level);
        self.set_propagate(propagate);
    }

    fn dispatch(&self, mut record: Record, on_error: &mut dyn FnMut(io::Error)) {
        if !self.is_enabled_for(record.level) {
            return;
        }
        if record.logger.is_empty() {
            record.logger = self.display_name().to_string();
        }

        self.write_to_sinks(&record, on_error);
        if !self.propagate() {
            return;
        }

        for ancestor in self.ancestors() {
            ancestor.write_to_sinks(&record, on_error);
            if !ancestor.propagate() {
                break;
            }
        }
    }

    fn write_to_sinks(&self, record: &Record, on_error: &mut dyn FnMut(io::Error)) {
        for sink in self.read_sinks().iter() {
            if let Err(err) = sink.emit(record) {
                on_error(err);
            }
        }
    }

    /// Registered ancestors, nearest first, ending with the root logger if it exists
    fn ancestors(&self) -> Vec<Logger> {
        let Some(registry) = self.inner.registry.upgrade() else {
            return Vec::new();
        };
        let loggers = registry.lock().unwrap_or_else(PoisonError::into_inner);

        let mut found = Vec::new();
        let mut name = self.inner.name.as_str();
        while let Some(parent) = parent_name(name) {
            if let Some(logger) = loggers.get(parent) {
                found.push(logger.clone());
            }
            name = parent;
        }
        found
    }

    fn read_sinks(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<dyn Sink>>> {
        self.inner.sinks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_sinks(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Arc<dyn Sink>>> {
        self.inner.sinks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.display_name())
            .field("level", &self.level())
            .field("propagate", &self.propagate())
            .field("sinks", &self.sink_count())
            .finish()
    }
}

/// Last-resort reporting when a record cannot be built or written
fn report_error(err: &dyn fmt::Display) {
    eprintln!("--- Logging error ---\n{}", err);
}
