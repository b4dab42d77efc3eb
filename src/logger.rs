// SPDX-License-Identifier: MIT OR Apache-2.0

//! The logger handle.
//!
//! A [`Logger`] ties together a level threshold, a compiled [`FormatTemplate`] and a
//! [`Sink`].  Each call filters by level, renders, and performs exactly one sink write,
//! synchronously on the calling thread.
//!
//! Loggers are ordinary values: construct one (directly or from a
//! [`LoggerConfig`](crate::LoggerConfig)) and pass it, usually in an `Arc`, to whatever
//! needs to log.  The [`global_logger`](crate::global_logger) module layers an optional
//! process-wide slot on top.

use crate::error::SinkError;
use crate::log_record::LogRecord;
use crate::sink::Sink;
use crate::template::FormatTemplate;
use crate::Level;
use std::future::Future;
use std::pin::Pin;

/**
A configured logger.

```rust
use patternlog::{FormatTemplate, InMemorySink, Level, Logger};
use std::sync::Arc;

let sink = Arc::new(InMemorySink::new());
let logger = Logger::new(
    Level::Warn,
    FormatTemplate::compile("[%L] %S: %S").unwrap(),
    Box::new(sink.clone()),
);

logger.info(&["ignored", "below threshold"]).unwrap();
logger.error(&["db", "connection refused"]).unwrap();
assert_eq!(sink.drain_logs(), "[ERROR] db: connection refused");
```
*/
#[derive(Debug)]
pub struct Logger {
    threshold: Level,
    template: FormatTemplate,
    sink: Box<dyn Sink>,
}

impl Logger {
    /**
    Creates a logger that writes records at or above `threshold` to `sink`, rendered
    with `template`.
    */
    pub fn new(threshold: Level, template: FormatTemplate, sink: Box<dyn Sink>) -> Self {
        Self {
            threshold,
            template,
            sink,
        }
    }

    /// Whether a record at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    /**
    The lowest level this logger writes.
    */
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /**
    The template every record is rendered with.
    */
    pub fn template(&self) -> &FormatTemplate {
        &self.template
    }

    /**
    The sink records are written to.
    */
    pub fn sink(&self) -> &dyn Sink {
        self.sink.as_ref()
    }

    /**
    Renders and writes `record` if its level passes the threshold.

    Records below the threshold return `Ok(())` without touching the sink.  Sink
    failures are returned as-is; nothing is retried or buffered.
    */
    pub fn log(&self, record: &LogRecord) -> Result<(), SinkError> {
        self.log_args(record.level(), record.args())
    }

    /**
    Like [Logger::log], for callers that already hold the arguments as strings.
    */
    pub fn log_args<S: AsRef<str>>(&self, level: Level, args: &[S]) -> Result<(), SinkError> {
        if !self.enabled(level) {
            return Ok(());
        }
        self.sink.write(&self.template.render(level, args))
    }

    /**
    Logs `record` from async code.

    The write itself is synchronous; this wraps it so it can be awaited alongside other
    work.
    */
    pub fn log_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), SinkError>> + Send + 's>> {
        Box::pin(async move { self.log(&record) })
    }

    pub fn debug<S: AsRef<str>>(&self, args: &[S]) -> Result<(), SinkError> {
        self.log_args(Level::Debug, args)
    }

    pub fn info<S: AsRef<str>>(&self, args: &[S]) -> Result<(), SinkError> {
        self.log_args(Level::Info, args)
    }

    pub fn warn<S: AsRef<str>>(&self, args: &[S]) -> Result<(), SinkError> {
        self.log_args(Level::Warn, args)
    }

    pub fn error<S: AsRef<str>>(&self, args: &[S]) -> Result<(), SinkError> {
        self.log_args(Level::Error, args)
    }

    /// Logs at [Level::Fatal].  Does not exit the process; that is the caller's call.
    pub fn fatal<S: AsRef<str>>(&self, args: &[S]) -> Result<(), SinkError> {
        self.log_args(Level::Fatal, args)
    }

    /**
    Closes the sink.  Further logging fails with whatever the sink reports for writes
    after close.
    */
    pub fn close(&self) -> Result<(), SinkError> {
        self.sink.close()
    }
}

/*
Boilerplate notes.

# Logger

Clone is out: the sink owns a file or socket.  Share a Logger through Arc instead.
PartialEq/Hash would have to compare sinks; not implemented.
Default is not sensible since a template and sink are required.
Send/Sync hold because Sink requires them and FormatTemplate is immutable.
*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::inmemory_sink::InMemorySink;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn logger(threshold: Level, pattern: &str) -> (Logger, Arc<InMemorySink>) {
        let sink = Arc::new(InMemorySink::new());
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let template = FormatTemplate::compile(pattern)
            .unwrap()
            .with_clock(Arc::new(FixedClock(now)));
        (Logger::new(threshold, template, Box::new(sink.clone())), sink)
    }

    #[test]
    fn threshold_filters_lower_levels() {
        let (logger, sink) = logger(Level::Warn, "%L");
        logger.debug(&["x"]).unwrap();
        logger.info(&["x"]).unwrap();
        assert!(sink.is_empty());

        logger.warn(&["x"]).unwrap();
        logger.error(&["x"]).unwrap();
        logger.fatal(&["x"]).unwrap();
        assert_eq!(sink.drain_logs(), "WARN\nERROR\nFATAL");
    }

    #[test]
    fn debug_records_are_ordinary() {
        let (logger, sink) = logger(Level::Debug, "%T %L %S");
        logger.debug(&["still running"]).unwrap();
        logger.info(&["after debug"]).unwrap();
        assert_eq!(
            sink.drain_logs(),
            "2024-01-01T10:00:00 DEBUG still running\n2024-01-01T10:00:00 INFO after debug"
        );
    }

    #[test]
    fn log_uses_record_level_and_args() {
        let (logger, sink) = logger(Level::Info, "%L %S/%S");
        let mut record = LogRecord::new(Level::Error);
        record.arg("a").arg(&2);
        logger.log(&record).unwrap();
        assert_eq!(sink.drain_logs(), "ERROR a/2");
    }

    #[test]
    fn sink_errors_reach_caller() {
        let (logger, _sink) = logger(Level::Info, "%S");
        logger.close().unwrap();
        assert!(matches!(logger.info(&["late"]), Err(SinkError::Closed)));
        // filtered calls never reach the closed sink
        logger.debug(&["late"]).unwrap();
    }

    #[test]
    fn logger_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();
    }
}
