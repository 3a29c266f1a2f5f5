// file: src/sink/stream.rs
// version: 1.0.0
// guid: a2d6c8e1-4f37-4b95-8c20-d71e3b5a9f64

//! Stream sink over any writer, and the stderr console sink built on it

use super::Sink;
use crate::format::Formatter;
use crate::record::Record;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Writes one formatted line per record to a shared writer
pub struct StreamSink<W: Write + Send> {
    formatter: Formatter,
    writer: Mutex<W>,
}

/// Console sink writing to standard error
pub type ConsoleSink = StreamSink<io::Stderr>;

impl<W: Write + Send> StreamSink<W> {
    pub fn new(writer: W, formatter: Formatter) -> Self {
        Self {
            formatter,
            writer: Mutex::new(writer),
        }
    }

    pub fn formatter(&self) -> Formatter {
        self.formatter
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StreamSink<io::Stderr> {
    /// Console sink on standard error
    pub fn stderr(formatter: Formatter) -> Self {
        Self::new(io::stderr(), formatter)
    }
}

impl<W: Write + Send> Sink for StreamSink<W> {
    fn emit(&self, record: &Record) -> io::Result<()> {
        let mut line = self.formatter.format(record);
        line.push('\n');

        let mut writer = self.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }

    fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}
