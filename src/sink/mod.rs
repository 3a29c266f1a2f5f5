// file: src/sink/mod.rs
// version: 1.0.0
// guid: 5e7f1a3c-92d8-4b60-a1e4-6c0b8d27f913

//! Destinations that receive formatted log lines
//!
//! Every sink owns its formatter and serializes its own writes, so a single
//! sink may be shared by any number of threads.

pub mod rotating;
pub mod stream;

pub use rotating::RotatingFileSink;
pub use stream::{ConsoleSink, StreamSink};

use crate::record::Record;
use std::io;

/// A destination for log records
pub trait Sink: Send + Sync {
    /// Format and write one record
    fn emit(&self, record: &Record) -> io::Result<()>;

    /// Flush any buffered output
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}
