// SPDX-License-Identifier: MIT OR Apache-2.0

//! Format templates.
//!
//! A template is compiled once from a pattern string into an ordered list of [`Part`]s,
//! then rendered for every record.  `%` introduces a control character:
//!
//! | control | renders | consumes an argument |
//! |---------|---------|----------------------|
//! | `%T` | `YYYY-MM-DDTHH:MM:SS` | no |
//! | `%y` `%M` `%d` | year, month, day (unpadded) | no |
//! | `%h` `%m` `%s` | hour, minute, second (unpadded) | no |
//! | `%L` | level name, e.g. `WARN` | no |
//! | `%S` | the next positional argument, or nothing if none remain | yes |
//!
//! Everything else is copied through literally.  There is no escape for a literal `%`.
//!
//! Time controls read the clock when the record is rendered, not when the template is
//! compiled.
//!
//! ```rust
//! use patternlog::{FormatTemplate, Level};
//!
//! let template = FormatTemplate::compile("[%L] %S-%S").unwrap();
//! assert_eq!(template.render(Level::Warn, &["a", "b"]), b"[WARN] a-b\n");
//! assert_eq!(template.render(Level::Warn, &["a"]), b"[WARN] a-\n");
//! ```

use crate::clock::{Clock, SystemClock};
use crate::error::ConfigError;
use crate::log_record::LogRecord;
use crate::Level;
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::str::FromStr;
use std::sync::Arc;

const ESCAPE: char = '%';

/// A single wall-clock component selected by a time control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    /// `%T`
    Timestamp,
    /// `%y`
    Year,
    /// `%M`
    Month,
    /// `%d`
    Day,
    /// `%h`
    Hour,
    /// `%m`
    Minute,
    /// `%s`
    Second,
}

impl TimeField {
    fn render(self, now: &NaiveDateTime) -> String {
        match self {
            TimeField::Timestamp => now.format("%Y-%m-%dT%H:%M:%S").to_string(),
            TimeField::Year => now.year().to_string(),
            TimeField::Month => now.month().to_string(),
            TimeField::Day => now.day().to_string(),
            TimeField::Hour => now.hour().to_string(),
            TimeField::Minute => now.minute().to_string(),
            TimeField::Second => now.second().to_string(),
        }
    }
}

/// One step of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Part {
    /// Text copied through unchanged.
    Literal(String),
    /// A component of the render-time wall clock.
    Time(TimeField),
    /// The record's level name.
    Level,
    /// The next positional argument.
    Placeholder,
}

impl Part {
    fn from_control(control: char) -> Option<Part> {
        let part = match control {
            'T' => Part::Time(TimeField::Timestamp),
            'y' => Part::Time(TimeField::Year),
            'M' => Part::Time(TimeField::Month),
            'd' => Part::Time(TimeField::Day),
            'h' => Part::Time(TimeField::Hour),
            'm' => Part::Time(TimeField::Minute),
            's' => Part::Time(TimeField::Second),
            'L' => Part::Level,
            'S' => Part::Placeholder,
            _ => return None,
        };
        Some(part)
    }

    /**
    Appends this part's text to `out`.

    Returns whether `arg` was consumed.
    */
    fn render_into(
        &self,
        level: Level,
        arg: Option<&str>,
        now: &NaiveDateTime,
        out: &mut String,
    ) -> bool {
        match self {
            Part::Literal(text) => out.push_str(text),
            Part::Time(field) => out.push_str(&field.render(now)),
            Part::Level => out.push_str(level.name()),
            Part::Placeholder => {
                if let Some(arg) = arg {
                    out.push_str(arg);
                    return true;
                }
            }
        }
        false
    }
}

/**
A compiled format template.

Templates are immutable after [FormatTemplate::compile] and may be shared between
threads and used for any number of concurrent renders.
*/
#[derive(Debug, Clone)]
pub struct FormatTemplate {
    pattern: String,
    parts: Vec<Part>,
    clock: Arc<dyn Clock>,
}

impl FormatTemplate {
    /**
    Compiles `pattern`.

    # Errors

    [ConfigError::InvalidControl] if `%` is followed by anything other than a known
    control character (including another `%`), with the byte offset of that character.
    [ConfigError::DanglingEscape] if the pattern ends with `%`.
    */
    pub fn compile(pattern: &str) -> Result<Self, ConfigError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.char_indices();
        while let Some((_, c)) = chars.next() {
            if c != ESCAPE {
                literal.push(c);
                continue;
            }
            if !literal.is_empty() {
                parts.push(Part::Literal(std::mem::take(&mut literal)));
            }
            let Some((offset, control)) = chars.next() else {
                return Err(ConfigError::DanglingEscape {
                    pattern: pattern.to_string(),
                });
            };
            let part = Part::from_control(control).ok_or_else(|| ConfigError::InvalidControl {
                offset,
                pattern: pattern.to_string(),
            })?;
            parts.push(part);
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            parts,
            clock: Arc::new(SystemClock),
        })
    }

    /**
    Replaces the clock used by [FormatTemplate::render].
    */
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /**
    Renders a record against the current wall clock.

    The output always ends in exactly one `\n` appended after the last part.
    */
    pub fn render<S: AsRef<str>>(&self, level: Level, args: &[S]) -> Vec<u8> {
        self.render_at(level, args, self.clock.now())
    }

    /**
    Renders with an explicit time for the time controls.

    Placeholders take `args` strictly left to right.  Once the arguments run out, the
    remaining placeholders render as nothing; surplus arguments are ignored.
    */
    pub fn render_at<S: AsRef<str>>(&self, level: Level, args: &[S], now: NaiveDateTime) -> Vec<u8> {
        let mut out = String::with_capacity(self.pattern.len() + 16);
        let mut remaining = args.iter().map(AsRef::as_ref);
        let mut current = remaining.next();
        for part in &self.parts {
            if part.render_into(level, current, &now, &mut out) {
                current = remaining.next();
            }
        }
        out.push('\n');
        out.into_bytes()
    }

    /**
    Renders a [LogRecord] against the current wall clock.
    */
    pub fn render_record(&self, record: &LogRecord) -> Vec<u8> {
        self.render(record.level(), record.args())
    }

    /// The pattern this template was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /**
    The compiled parts, in pattern order.  Adjacent literal text is merged into one
    [Part::Literal].
    */
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// How many `%S` placeholders the template contains.
    pub fn placeholder_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part, Part::Placeholder))
            .count()
    }
}

impl FromStr for FormatTemplate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}
