// file: src/test_support.rs
// version: 1.0.0
// guid: 48f0d3b7-6a15-4e9c-8d72-b1c5e09a3f26

//! Helpers shared by unit tests

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Writer shared between a sink and the test that inspects it
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
