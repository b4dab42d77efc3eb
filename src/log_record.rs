// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type.
//!
//! A [`LogRecord`] is a level plus the positional arguments for the template's `%S`
//! placeholders.  Arguments are captured as strings when they are pushed, so a record
//! owns everything it needs and can be moved to whichever thread performs the write.
//!
//! # Example
//!
//! ```rust
//! use patternlog::{Level, LogRecord};
//!
//! let mut record = LogRecord::new(Level::Info);
//! record.arg("request");
//! record.arg(&42);
//! assert_eq!(record.args(), ["request", "42"]);
//! ```

use crate::Level;
use std::fmt::Display;

/**
A log record.

Records are ephemeral: build one, hand it to [crate::Logger::log], and it is gone.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    args: Vec<String>,
    level: Level,
}

impl LogRecord {
    pub fn new(level: Level) -> Self {
        Self {
            args: Vec::new(),
            level,
        }
    }

    /**
    Build a record from already-rendered arguments.
    */
    pub fn with_args<I, S>(level: Level, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            level,
        }
    }

    /**
    Append an argument, rendered through its `Display` implementation.
    */
    pub fn arg<D: Display + ?Sized>(&mut self, value: &D) -> &mut Self {
        self.args.push(value.to_string());
        self
    }

    /**
    Append an argument that is already a `String`, without copying it.
    */
    pub fn arg_owned(&mut self, value: String) -> &mut Self {
        self.args.push(value);
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug/Clone/PartialEq/Eq/Hash: derived, records are plain data
- Default: Info level, no arguments

NOT IMPLEMENTED:
- Display: a record has no text of its own until it meets a template
- Ord: no meaningful ordering
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_keep_call_order() {
        let mut record = LogRecord::new(Level::Warn);
        record.arg("a").arg(&1.5).arg_owned("c".to_string());
        assert_eq!(record.args(), ["a", "1.5", "c"]);
        assert_eq!(record.level(), Level::Warn);
    }

    #[test]
    fn with_args_collects() {
        let record = LogRecord::with_args(Level::Error, ["x", "y"]);
        assert_eq!(record.args(), ["x", "y"]);
    }
}
