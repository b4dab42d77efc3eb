// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Sink
//!
//! [`InMemorySink`] keeps rendered records in memory instead of writing them anywhere.
//! It is useful for:
//!
//! - Unit testing code that logs through a [`Logger`](crate::Logger)
//! - Inspecting rendered output programmatically
//!
//! Records are stored one per entry, with the template's trailing newline removed.

use crate::error::SinkError;
use crate::sink::Sink;
use std::sync::Mutex;

/// A sink that stores rendered records in a `Vec<String>`.
///
/// # Example
///
/// ```rust
/// use patternlog::{FormatTemplate, InMemorySink, Level, Logger};
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// let template = FormatTemplate::compile("%L %S").unwrap();
/// let logger = Logger::new(Level::Info, template, Box::new(sink.clone()));
///
/// logger.info(&["hello"]).unwrap();
/// logger.debug(&["filtered"]).unwrap();
///
/// assert_eq!(sink.drain_logs(), "INFO hello");
/// ```
#[derive(Debug)]
pub struct InMemorySink {
    logs: Mutex<Vec<String>>,
    closed: Mutex<bool>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug: derived
// - Default: empty buffer
// - Clone: NOT implemented, two handles to one buffer are spelled Arc<InMemorySink>
// - PartialEq/Eq/Hash: NOT implemented, comparing mutex contents is not meaningful

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
            closed: Mutex::new(false),
        }
    }

    /// Returns all records joined by newlines and clears the buffer.
    ///
    /// Poisoning is ignored here: a panic elsewhere should not hide what was logged.
    pub fn drain_logs(&self) -> String {
        let mut logs = self.logs.lock().unwrap_or_else(|e| e.into_inner());
        let result = logs.join("\n");
        logs.clear();
        result
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.logs.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for InMemorySink {
    fn write(&self, data: &[u8]) -> Result<(), SinkError> {
        if *self.closed.lock()? {
            return Err(SinkError::Closed);
        }
        let text = String::from_utf8_lossy(data);
        let text = text.strip_suffix('\n').unwrap_or(&text);
        self.logs.lock()?.push(text.to_string());
        Ok(())
    }

    fn close(&self) -> Result<(), SinkError> {
        *self.closed.lock()? = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_clears() {
        let sink = InMemorySink::new();
        sink.write(b"one\n").unwrap();
        sink.write(b"two\n").unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.drain_logs(), "one\ntwo");
        assert!(sink.is_empty());
        assert_eq!(sink.drain_logs(), "");
    }

    #[test]
    fn write_after_close_fails() {
        let sink = InMemorySink::new();
        sink.close().unwrap();
        assert!(matches!(sink.write(b"x\n"), Err(SinkError::Closed)));
        sink.close().unwrap();
    }
}
