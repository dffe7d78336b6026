// tests/common/mod.rs
// Shared helpers for integration tests

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use sigil_log::{ConsoleSink, Format};

/// Cloneable in-memory writer so a test can read what a sink wrote.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("utf-8 log output")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
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

/// A console sink writing into a fresh buffer.
pub fn console(format: Format) -> (ConsoleSink<SharedBuffer>, SharedBuffer) {
    let buffer = SharedBuffer::default();
    (ConsoleSink::new(buffer.clone(), format), buffer)
}
