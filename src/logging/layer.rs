// file: src/logging/layer.rs
// version: 1.0.0
// guid: 0a6d2f8e-c17b-4953-be34-7d19e5a0c4f2

//! Bridge from `tracing` events into a named logger
//!
//! ```no_run
//! use log_factory::{get_logger, LoggerOptions};
//! use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
//!
//! let logger = get_logger(Some("svc"), &LoggerOptions::default()).unwrap();
//! tracing_subscriber::registry().with(logger.layer()).init();
//! tracing::info!(request_id = "abc", "started");
//! ```

use super::logger::Logger;
use crate::level::Level;
use crate::record::{render_error_chain, Record, UNKNOWN_FUNCTION};
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// `tracing_subscriber` layer that writes every event through a [`Logger`]
#[derive(Debug, Clone)]
pub struct LoggerLayer {
    logger: Logger,
}

impl LoggerLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl Logger {
    /// Wrap this logger as a `tracing_subscriber` layer
    pub fn layer(&self) -> LoggerLayer {
        LoggerLayer::new(self.clone())
    }
}

impl<S: Subscriber> Layer<S> for LoggerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Our own diagnostics would feed back into the sinks that produced them
        if is_internal(metadata.target()) {
            return;
        }

        let level = map_level(metadata.level());
        if !self.logger.is_enabled_for(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let record = Record::new(level, visitor.message.unwrap_or_default())
            .with_location(
                metadata.module_path().unwrap_or(metadata.target()),
                UNKNOWN_FUNCTION,
                metadata.line().unwrap_or(0),
            )
            .with_extras(visitor.fields);
        self.logger.log(record);
    }
}

fn map_level(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warning,
        tracing::Level::INFO => Level::Info,
        _ => Level::Debug,
    }
}

fn is_internal(target: &str) -> bool {
    target.split("::").next() == Some(env!("CARGO_CRATE_NAME"))
}

/// Collects the `message` field and everything else as extras
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(text) => text,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn StdError + 'static)) {
        self.insert(field, Value::from(render_error_chain(value)));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::from(format!("{:?}", value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Formatter;
    use crate::sink::StreamSink;
    use crate::test_support::SharedBuffer;
    use std::sync::Arc;
    use tracing_subscriber::layer::SubscriberExt;

    fn json_logger(level: Level) -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let logger = Logger::new("bridge");
        logger.set_level(level);
        logger.add_sink(Arc::new(StreamSink::new(buffer.clone(), Formatter::Json)));
        (logger, buffer)
    }

    #[test]
    fn test_events_become_records_with_extras() {
        // Arrange
        let (logger, buffer) = json_logger(Level::Info);
        let subscriber = tracing_subscriber::registry().with(logger.layer());

        // Act
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "app", request_id = "abc", attempt = 2, "handled {}", "café");
            tracing::debug!(target: "app", "filtered out");
        });

        // Assert
        let output = buffer.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1);
        let object: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(object["message"], "handled café");
        assert_eq!(object["level"], "INFO");
        assert_eq!(object["request_id"], "abc");
        assert_eq!(object["attempt"], 2);
        assert_eq!(object["function"], UNKNOWN_FUNCTION);
        assert!(object["line"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(map_level(&tracing::Level::TRACE), Level::Debug);
        assert_eq!(map_level(&tracing::Level::DEBUG), Level::Debug);
        assert_eq!(map_level(&tracing::Level::INFO), Level::Info);
        assert_eq!(map_level(&tracing::Level::WARN), Level::Warning);
        assert_eq!(map_level(&tracing::Level::ERROR), Level::Error);
    }

    #[test]
    fn test_internal_targets_are_skipped() {
        assert!(is_internal(env!("CARGO_CRATE_NAME")));
        assert!(is_internal(&format!("{}::sink::rotating", env!("CARGO_CRATE_NAME"))));
        assert!(!is_internal("my_app::server"));
    }
}
