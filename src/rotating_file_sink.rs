// SPDX-License-Identifier: MIT OR Apache-2.0

//! Size-rotated log files.
//!
//! [`RotatingFileSink`] writes records into a directory of files named
//!
//! ```text
//! <prefix><tag>#<sequence>.log
//! ```
//!
//! where `tag` is the local wall-clock second at which the file was started
//! (e.g. `2024-1-1T10-0-0`) and `sequence` distinguishes files started within the same
//! second.  When appending a record would push the current file past the size limit,
//! the sink rolls over to a new file first.  Records are never split between files.
//!
//! The name of the current file is persisted as `<tag>#<sequence>` in a metadata file
//! (`.log-metadata`) inside the directory.  A sink opened on a directory that already
//! has metadata resumes appending to that exact file.
//!
//! # Example
//!
//! ```rust
//! use patternlog::{FileSinkOptions, RotatingFileSink, Sink};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let options = FileSinkOptions::new(dir.path())
//!     .name_prefix("app-")
//!     .max_file_size("0.5kb");
//! let sink = RotatingFileSink::open(&options).unwrap();
//! assert_eq!(sink.max_file_size(), 512);
//!
//! sink.write(b"hello\n").unwrap();
//! sink.close().unwrap();
//! ```

use crate::clock::{Clock, SystemClock};
use crate::error::{ConfigError, SinkError};
use crate::sink::Sink;
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const DEFAULT_NAME_PREFIX: &str = "log-";
pub const DEFAULT_MAX_FILE_SIZE: &str = "1MB";
/// Name of the file, inside the log directory, that records the current file.
pub const METADATA_FILE_NAME: &str = ".log-metadata";

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/**
Parses a human-readable size such as `"100"`, `"4KB"` or `"0.5kb"` into bytes.

The number may be fractional; the result is truncated to whole bytes.  Units are
`B`, `KB` and `MB` (case-insensitive), or none for bytes.
*/
pub fn parse_file_size(input: &str) -> Result<u64, ConfigError> {
    let mut number = String::new();
    let mut unit = String::new();
    for c in input.chars() {
        if unit.is_empty() && (c.is_ascii_digit() || c == '.') {
            number.push(c);
        } else if c.is_ascii_alphabetic() {
            unit.push(c);
        } else {
            return Err(ConfigError::InvalidSize(input.to_string()));
        }
    }
    let value: f64 = number
        .parse()
        .map_err(|_| ConfigError::InvalidSize(input.to_string()))?;
    let multiplier = match unit.to_ascii_uppercase().as_str() {
        "" | "B" => 1.0,
        "KB" => KIB,
        "MB" => MIB,
        _ => {
            return Err(ConfigError::UnknownSizeUnit {
                input: input.to_string(),
                unit,
            });
        }
    };
    Ok((value * multiplier) as u64)
}

/**
Options for [RotatingFileSink].

Field names follow the configuration file keys (`logPath`, `logFileNamePrefix`,
`maxSingleFileSize`).  Empty strings for the prefix or size mean "use the default".
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileSinkOptions {
    pub log_path: PathBuf,
    pub log_file_name_prefix: String,
    pub max_single_file_size: String,
}

fn default_name_prefix() -> String {
    DEFAULT_NAME_PREFIX.to_string()
}

fn default_max_file_size() -> String {
    DEFAULT_MAX_FILE_SIZE.to_string()
}

impl FileSinkOptions {
    /**
    Options for a sink writing into `log_path`, with the default prefix and size limit.
    */
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            log_file_name_prefix: default_name_prefix(),
            max_single_file_size: default_max_file_size(),
        }
    }

    /**
    Prefix of every log file name, before the rotation tag.
    */
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_name_prefix = prefix.into();
        self
    }

    /// Size limit in the [parse_file_size] grammar.
    pub fn max_file_size(mut self, size: impl Into<String>) -> Self {
        self.max_single_file_size = size.into();
        self
    }
}

/// The `<tag>#<sequence>` identity of one log file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct RotationTag {
    tag: String,
    sequence: u32,
}

impl RotationTag {
    /// Splits at the last `#`, so tags may themselves contain `#`.
    fn parse(content: &str) -> Result<Self, ConfigError> {
        let (tag, sequence) = content
            .rsplit_once('#')
            .ok_or_else(|| ConfigError::MalformedMetadata(content.to_string()))?;
        let sequence = sequence
            .parse()
            .map_err(|_| ConfigError::MalformedMetadata(content.to_string()))?;
        Ok(Self {
            tag: tag.to_string(),
            sequence,
        })
    }

    /// Fails if the sequence would overflow within a single second.
    fn next(&self, now: NaiveDateTime) -> Result<Self, ConfigError> {
        let tag = format!(
            "{}-{}-{}T{}-{}-{}",
            now.year(),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second()
        );
        let sequence = if tag == self.tag {
            self.sequence
                .checked_add(1)
                .ok_or_else(|| ConfigError::MalformedMetadata(self.to_string()))?
        } else {
            0
        };
        Ok(Self { tag, sequence })
    }
}

impl Display for RotationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.tag, self.sequence)
    }
}

/// Where files live and how they are named.
#[derive(Debug)]
struct FileLayout {
    directory: PathBuf,
    name_prefix: String,
}

impl FileLayout {
    fn log_file_path(&self, tag: &RotationTag) -> PathBuf {
        self.directory
            .join(format!("{}{}.log", self.name_prefix, tag))
    }

    fn metadata_path(&self) -> PathBuf {
        self.directory.join(METADATA_FILE_NAME)
    }

    /// Overwrites the metadata by writing a sibling file and renaming it into place.
    fn persist(&self, tag: &RotationTag) -> Result<(), ConfigError> {
        let path = self.metadata_path();
        let staging = self.directory.join(format!("{METADATA_FILE_NAME}.tmp"));
        fs::write(&staging, tag.to_string())
            .and_then(|()| fs::rename(&staging, &path))
            .map_err(|source| ConfigError::PersistMetadata { path, source })
    }
}

#[derive(Debug)]
struct ActiveFile {
    file: File,
    size: u64,
}

impl ActiveFile {
    fn open(path: &Path) -> Result<Self, ConfigError> {
        let open_error = |source| ConfigError::OpenLogFile {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(open_error)?;
        let size = file.metadata().map_err(open_error)?.len();
        Ok(Self { file, size })
    }
}

#[derive(Debug, Default)]
struct RotationState {
    current: RotationTag,
    /// `None` once closed, or after a rollover failed.
    active: Option<ActiveFile>,
}

impl RotationState {
    fn roll_over(&mut self, layout: &FileLayout, now: NaiveDateTime) -> Result<(), ConfigError> {
        self.active = None;
        let next = self.current.next(now)?;
        layout.persist(&next)?;
        let path = layout.log_file_path(&next);
        self.current = next;
        self.active = Some(ActiveFile::open(&path)?);
        log::debug!("rolled over to {}", path.display());
        Ok(())
    }
}

fn ensure_directory(directory: &Path) -> Result<(), ConfigError> {
    match fs::metadata(directory) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ConfigError::NotADirectory(directory.to_path_buf())),
        Err(_) => fs::create_dir_all(directory).map_err(|source| ConfigError::CreateDirectory {
            path: directory.to_path_buf(),
            source,
        }),
    }
}

/**
A sink that writes to size-limited files in one directory.

The size check, any rollover, the append, and the size update happen under one lock,
so concurrent writers cannot both decide the file has room and overfill it.

Not safe for several processes sharing one directory.
*/
#[derive(Debug)]
pub struct RotatingFileSink {
    layout: FileLayout,
    max_file_size: u64,
    clock: Arc<dyn Clock>,
    state: Mutex<RotationState>,
}

impl RotatingFileSink {
    /**
    Opens the sink, resuming the file named in the directory's metadata if there is one.

    # Errors

    Any [ConfigError] that prevents establishing which file to write: the path is not a
    usable directory, the size is unparsable, the metadata is malformed or cannot be
    written, or the log file cannot be opened.
    */
    pub fn open(options: &FileSinkOptions) -> Result<Self, ConfigError> {
        Self::open_with_clock(options, Arc::new(SystemClock))
    }

    /**
    Like [RotatingFileSink::open], with the clock used for rotation tags.
    */
    pub fn open_with_clock(
        options: &FileSinkOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        ensure_directory(&options.log_path)?;
        let max_file_size = if options.max_single_file_size.is_empty() {
            parse_file_size(DEFAULT_MAX_FILE_SIZE)?
        } else {
            parse_file_size(&options.max_single_file_size)?
        };
        let name_prefix = if options.log_file_name_prefix.is_empty() {
            default_name_prefix()
        } else {
            options.log_file_name_prefix.clone()
        };
        let layout = FileLayout {
            directory: options.log_path.clone(),
            name_prefix,
        };

        let mut state = RotationState::default();
        let metadata_path = layout.metadata_path();
        match fs::read_to_string(&metadata_path) {
            Ok(content) => {
                let current = RotationTag::parse(&content)?;
                let path = layout.log_file_path(&current);
                let active = ActiveFile::open(&path)?;
                log::debug!(
                    "resuming {} at {} bytes",
                    path.display(),
                    active.size
                );
                state.current = current;
                state.active = Some(active);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                state.roll_over(&layout, clock.now())?;
            }
            Err(source) => {
                return Err(ConfigError::ReadMetadata {
                    path: metadata_path,
                    source,
                });
            }
        }

        Ok(Self {
            layout,
            max_file_size,
            clock,
            state: Mutex::new(state),
        })
    }

    fn state(&self) -> std::sync::MutexGuard<'_, RotationState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /**
    The directory holding the log files and the metadata file.
    */
    pub fn directory(&self) -> &Path {
        &self.layout.directory
    }

    /**
    The file name prefix in use, after defaulting.
    */
    pub fn name_prefix(&self) -> &str {
        &self.layout.name_prefix
    }

    /// Size limit in bytes.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /**
    Path of the [METADATA_FILE_NAME] file naming the current log file.
    */
    pub fn metadata_path(&self) -> PathBuf {
        self.layout.metadata_path()
    }

    /// The file currently written to, or `None` once closed.
    pub fn current_path(&self) -> Option<PathBuf> {
        let state = self.state();
        state
            .active
            .as_ref()
            .map(|_| self.layout.log_file_path(&state.current))
    }

    /// Bytes in the current file, as counted by this sink.
    pub fn current_size(&self) -> u64 {
        self.state().active.as_ref().map_or(0, |active| active.size)
    }

    /// The `<tag>#<sequence>` identity of the current file.
    pub fn current_tag(&self) -> String {
        self.state().current.to_string()
    }
}

impl Sink for RotatingFileSink {
    /**
    Appends `data`, rolling over first if it would not fit.

    A record larger than the limit still rolls over and is then written whole, so a
    file may exceed the limit by one record.
    */
    fn write(&self, data: &[u8]) -> Result<(), SinkError> {
        let mut state = self.state.lock()?;
        let size = match &state.active {
            Some(active) => active.size,
            None => return Err(SinkError::Closed),
        };
        if size + data.len() as u64 > self.max_file_size {
            state.roll_over(&self.layout, self.clock.now())?;
        }
        let active = state.active.as_mut().ok_or(SinkError::Closed)?;
        active.file.write_all(data)?;
        active.size += data.len() as u64;
        Ok(())
    }

    /**
    Syncs and releases the current file.  Closing an already closed sink does nothing.
    */
    fn close(&self) -> Result<(), SinkError> {
        let mut state = self.state.lock()?;
        if let Some(active) = state.active.take() {
            active.file.sync_all()?;
            log::debug!("closed {}", self.layout.log_file_path(&state.current).display());
        }
        Ok(())
    }
}
