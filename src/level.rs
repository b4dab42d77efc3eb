// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::ConfigError;
use std::fmt::Display;
use std::str::FromStr;

/**
Severity of a log record.

Levels are totally ordered; a [crate::Logger] emits a record when its level is
greater than or equal to the logger's threshold.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Detail for whoever is debugging the application
    Debug,
    /// Routine operation
    #[default]
    Info,
    /// Suspicious condition
    Warn,
    /// Runtime error
    Error,
    /// Unrecoverable condition.  Logging at this level does not exit the process.
    Fatal,
}

impl Level {
    /// All levels, lowest first.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// The name rendered by the `%L` control.
    pub const fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    /**
    Parses a level name case-insensitively, e.g. `"warn"` or `"WARN"`.
    */
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownLevel(s.to_string()))
    }
}

/*
Boilerplate notes.

Copy/Clone/Eq/Ord/Hash are all natural for a fieldless enum.
Default is Info, which is the threshold most applications start with.
Display renders the same name as `%L`.
FromStr exists for the configuration file; it is the only fallible conversion.
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("FATAL".parse::<Level>().unwrap(), Level::Fatal);
        assert_eq!("Debug".parse::<Level>().unwrap(), Level::Debug);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLevel(ref name) if name == "verbose"));
    }

    #[test]
    fn display_is_name() {
        assert_eq!(Level::Error.to_string(), "ERROR");
    }
}
