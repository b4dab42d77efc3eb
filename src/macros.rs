// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging macros.
//!
//! The macros accept any number of `Display` arguments and only format them when the
//! logger's threshold lets the record through.  Each macro evaluates to the
//! `Result<(), SinkError>` of the write.
//!
//! ```rust
//! use patternlog::{FormatTemplate, InMemorySink, Level, Logger};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(InMemorySink::new());
//! let logger = Logger::new(
//!     Level::Info,
//!     FormatTemplate::compile("%L job %S took %Sms").unwrap(),
//!     Box::new(sink.clone()),
//! );
//!
//! let job = 23;
//! patternlog::info!(logger, job, 3.5).unwrap();
//! patternlog::debug!(logger, expensive()).unwrap();
//! # fn expensive() -> u8 { unreachable!() }
//! assert_eq!(sink.drain_logs(), "INFO job 23 took 3.5ms");
//! ```

/// Logs at an explicit [`Level`](crate::Level).
///
/// Arguments are evaluated only if the level is enabled.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(, $arg:expr)* $(,)?) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::Level = $level;
        if logger.enabled(level) {
            #[allow(unused_mut)]
            let mut record = $crate::LogRecord::new(level);
            $( record.arg(&$arg); )*
            logger.log(&record)
        } else {
            ::core::result::Result::<(), $crate::SinkError>::Ok(())
        }
    }};
}

/// Logs at [`Level::Debug`](crate::Level::Debug).
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Debug $(, $arg)*)
    };
}

/// Logs at [`Level::Info`](crate::Level::Info).
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Info $(, $arg)*)
    };
}

/// Logs at [`Level::Warn`](crate::Level::Warn).
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Warn $(, $arg)*)
    };
}

/// Logs at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Error $(, $arg)*)
    };
}

/// Logs at [`Level::Fatal`](crate::Level::Fatal).  Does not exit the process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Fatal $(, $arg)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::{FormatTemplate, InMemorySink, Level, Logger};
    use std::cell::Cell;
    use std::sync::Arc;

    fn logger(threshold: Level) -> (Arc<Logger>, Arc<InMemorySink>) {
        let sink = Arc::new(InMemorySink::new());
        let logger = Logger::new(
            threshold,
            FormatTemplate::compile("%L:%S:%S").unwrap(),
            Box::new(sink.clone()),
        );
        (Arc::new(logger), sink)
    }

    #[test]
    fn level_macros_route_by_level() {
        let (logger, sink) = logger(Level::Debug);
        crate::debug!(logger, "a", 1).unwrap();
        crate::info!(logger, "b").unwrap();
        crate::warn!(logger).unwrap();
        crate::error!(logger, "d", 'x',).unwrap();
        crate::fatal!(logger, "e", 2.5).unwrap();
        assert_eq!(
            sink.drain_logs(),
            "DEBUG:a:1\nINFO:b:\nWARN::\nERROR:d:x\nFATAL:e:2.5"
        );
    }

    #[test]
    fn disabled_levels_skip_argument_evaluation() {
        let (logger, sink) = logger(Level::Error);
        let evaluated = Cell::new(false);
        let arg = || {
            evaluated.set(true);
            "x"
        };
        crate::warn!(logger, arg()).unwrap();
        assert!(!evaluated.get());
        assert!(sink.is_empty());

        crate::log!(logger, Level::Error, arg()).unwrap();
        assert!(evaluated.get());
        assert_eq!(sink.drain_logs(), "ERROR:x:");
    }
}
