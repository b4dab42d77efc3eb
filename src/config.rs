// SPDX-License-Identifier: MIT OR Apache-2.0

//! Building a [`Logger`] from a YAML configuration file.
//!
//! ```yaml
//! level: info
//! format: "%T [%L] %S"
//! appender: file
//! appenderConfig:
//!   logPath: /var/log/myapp
//!   logFileNamePrefix: myapp-
//!   maxSingleFileSize: 4MB
//! ```
//!
//! `appender` is one of `stdout`, `tcp`, `udp` or `file` (case-insensitive).  When it is
//! absent or unrecognized, records go to standard output.  The `tcp` and `udp`
//! appenders read `serverAddr` from `appenderConfig`; `file` reads the keys shown above,
//! of which only `logPath` is required.

use crate::console_sink::ConsoleSink;
use crate::error::ConfigError;
use crate::logger::Logger;
use crate::network_sink::{TcpSink, UdpSink};
use crate::rotating_file_sink::{FileSinkOptions, RotatingFileSink};
use crate::sink::Sink;
use crate::template::FormatTemplate;
use crate::Level;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where a configured logger sends its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppenderKind {
    Stdout,
    Tcp,
    Udp,
    File,
}

impl AppenderKind {
    /// Case-insensitive lookup; `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "stdout" => Some(Self::Stdout),
            "tcp" => Some(Self::Tcp),
            "udp" => Some(Self::Udp),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

/// The `appenderConfig` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppenderConfig {
    pub server_addr: Option<String>,
    pub log_path: Option<PathBuf>,
    pub log_file_name_prefix: Option<String>,
    pub max_single_file_size: Option<String>,
}

impl AppenderConfig {
    fn server_addr(&self) -> Result<&str, ConfigError> {
        self.server_addr
            .as_deref()
            .ok_or(ConfigError::Missing("appenderConfig.serverAddr"))
    }

    fn file_options(&self) -> Result<FileSinkOptions, ConfigError> {
        let log_path = self
            .log_path
            .as_ref()
            .ok_or(ConfigError::Missing("appenderConfig.logPath"))?;
        let mut options = FileSinkOptions::new(log_path);
        if let Some(prefix) = &self.log_file_name_prefix {
            options = options.name_prefix(prefix.as_str());
        }
        if let Some(size) = &self.max_single_file_size {
            options = options.max_file_size(size.as_str());
        }
        Ok(options)
    }
}

/**
A parsed configuration file.

Required keys are checked by [LoggerConfig::build], not during parsing, so a missing
key surfaces as [ConfigError::Missing] naming it.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    pub level: Option<String>,
    pub format: Option<String>,
    pub appender: Option<String>,
    pub appender_config: Option<AppenderConfig>,
}

impl LoggerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// The configured appender, falling back to [AppenderKind::Stdout].
    pub fn appender_kind(&self) -> AppenderKind {
        match self.appender.as_deref() {
            None => {
                log::info!("no appender configured, logging to stdout");
                AppenderKind::Stdout
            }
            Some(name) => AppenderKind::from_name(name).unwrap_or_else(|| {
                log::warn!("unknown appender `{name}`, logging to stdout");
                AppenderKind::Stdout
            }),
        }
    }

    /**
    Builds the logger this configuration describes.

    Network appenders connect and the file appender opens its directory here, so every
    failure that can be detected up front is returned from this call.
    */
    pub fn build(&self) -> Result<Logger, ConfigError> {
        let threshold: Level = self
            .level
            .as_deref()
            .ok_or(ConfigError::Missing("level"))?
            .parse()?;
        let template = FormatTemplate::compile(
            self.format
                .as_deref()
                .ok_or(ConfigError::Missing("format"))?,
        )?;
        let sink = self.build_sink()?;
        Ok(Logger::new(threshold, template, sink))
    }

    fn build_sink(&self) -> Result<Box<dyn Sink>, ConfigError> {
        let appender = || {
            self.appender_config
                .as_ref()
                .ok_or(ConfigError::Missing("appenderConfig"))
        };
        let sink: Box<dyn Sink> = match self.appender_kind() {
            AppenderKind::Stdout => Box::new(ConsoleSink::new()),
            AppenderKind::Tcp => Box::new(TcpSink::connect(appender()?.server_addr()?)?),
            AppenderKind::Udp => Box::new(UdpSink::connect(appender()?.server_addr()?)?),
            AppenderKind::File => Box::new(RotatingFileSink::open(&appender()?.file_options()?)?),
        };
        Ok(sink)
    }
}

/// Reads the YAML file at `path` and builds the logger it describes.
pub fn init_logger(path: impl AsRef<Path>) -> Result<Logger, ConfigError> {
    LoggerConfig::from_file(path)?.build()
}
