// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.
//!
//! Errors come in two tiers:
//!
//! * [`ConfigError`] means a logger or sink could not establish (or keep) a trustworthy
//!   configuration: a bad template, a bad size string, an unusable log directory, or
//!   rotation metadata that cannot be read or persisted.  These are returned from
//!   construction; whether to abort is up to the embedding application.
//! * [`SinkError`] is returned from [`Sink::write`](crate::Sink::write) and
//!   [`Sink::close`](crate::Sink::close).  Plain I/O failures are recoverable and the
//!   caller decides whether to retry or drop the record.

use std::path::PathBuf;
use thiserror::Error;

/// A configuration-class failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The log directory did not exist and could not be created.
    #[error("failed to create log directory {path}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log path exists but is not a directory.
    #[error("log path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The size string could not be parsed.
    #[error("failed to parse file size `{0}`")]
    InvalidSize(String),

    /// The size string used a unit other than B, KB or MB.
    #[error("unsupported unit `{unit}` in file size `{input}`")]
    UnknownSizeUnit { input: String, unit: String },

    /// A template control character was not recognized.
    #[error("invalid control character at offset {offset} of `{pattern}`")]
    InvalidControl { offset: usize, pattern: String },

    /// The template ended with a bare `%`.
    #[error("template `{pattern}` ends with an unfinished control sequence")]
    DanglingEscape { pattern: String },

    /// The rotation metadata file could not be read.
    #[error("failed to read rotation metadata {path}")]
    ReadMetadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rotation metadata did not have the form `<tag>#<sequence>`.
    #[error("malformed rotation metadata `{0}`")]
    MalformedMetadata(String),

    /// The rotation metadata could not be written during a rollover.
    #[error("failed to persist rotation metadata {path}")]
    PersistMetadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A log file could not be opened or inspected.
    #[error("failed to open log file {path}")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unknown level name in configuration.
    #[error("unknown log level `{0}`")]
    UnknownLevel(String),

    /// A required configuration key was absent.
    #[error("missing configuration key `{0}`")]
    Missing(&'static str),

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was not valid YAML for [`crate::LoggerConfig`].
    #[error("failed to parse configuration: {0}")]
    ParseConfig(#[from] serde_yaml::Error),

    /// A network sink could not connect.
    #[error("failed to connect to {addr}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// A failure reported by a [`Sink`](crate::Sink).
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing to the underlying file or socket failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A rollover could not establish the identity of the next file.
    ///
    /// The sink should not be trusted after this.
    #[error(transparent)]
    Fatal(#[from] ConfigError),

    /// The sink was closed.
    #[error("sink is closed")]
    Closed,

    /// A network sink has no connection.
    #[error("no connection to close or write to")]
    NotConnected,

    /// A network sink was asked to connect while already connected.
    #[error("the previous connection has not been closed")]
    AlreadyConnected,

    /// Another thread panicked while holding the sink's lock.
    #[error("sink lock poisoned")]
    Poisoned,

    /// A process-wide convenience call was made before a logger was installed.
    #[error("no global logger installed")]
    NoGlobalLogger,
}

impl SinkError {
    /// Whether the failure means the sink can no longer prove which file it writes to.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SinkError::Fatal(_))
    }
}

impl<T> From<std::sync::PoisonError<T>> for SinkError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        SinkError::Poisoned
    }
}
