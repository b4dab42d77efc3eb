// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional process-wide logger.
//!
//! Nothing in this crate requires a global logger: a [`Logger`] is an ordinary value
//! that can be passed to whatever needs it.  For applications that prefer free
//! functions, this module holds one `Arc<Logger>` in a process-wide slot and offers
//! [`debug`], [`info`], [`warn`], [`error`] and [`fatal`] wrappers around it.
//!
//! # Examples
//!
//! ```
//! use patternlog::global_logger::{self, set_global_logger, take_global_logger};
//! use patternlog::{FormatTemplate, InMemorySink, Level, Logger};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(InMemorySink::new());
//! let logger = Logger::new(
//!     Level::Info,
//!     FormatTemplate::compile("%L %S").unwrap(),
//!     Box::new(sink.clone()),
//! );
//! set_global_logger(Arc::new(logger));
//!
//! global_logger::info(&["from anywhere"]).unwrap();
//! assert_eq!(sink.drain_logs(), "INFO from anywhere");
//!
//! // tear down: remove and close
//! take_global_logger().unwrap().close().unwrap();
//! ```
//!
//! # Thread Safety
//!
//! All functions are thread-safe.  The slot's lock is held only long enough to clone
//! or swap the `Arc`; logging itself happens outside it, so a slow sink never blocks
//! installing a new logger.

use crate::error::SinkError;
use crate::logger::Logger;
use crate::Level;
use std::sync::{Arc, RwLock};

static GLOBAL_LOGGER: RwLock<Option<Arc<Logger>>> = RwLock::new(None);

/// Returns the installed logger, if any.
pub fn global_logger() -> Option<Arc<Logger>> {
    GLOBAL_LOGGER
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// Installs `logger`, returning the one it replaces.
///
/// The replaced logger is not closed; callers that own it decide when to close it.
pub fn set_global_logger(logger: Arc<Logger>) -> Option<Arc<Logger>> {
    GLOBAL_LOGGER
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .replace(logger)
}

/// Removes and returns the installed logger.
pub fn take_global_logger() -> Option<Arc<Logger>> {
    GLOBAL_LOGGER
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .take()
}

/// Logs through the installed logger.
///
/// Fails with [SinkError::NoGlobalLogger] if none is installed.
pub fn log<S: AsRef<str>>(level: Level, args: &[S]) -> Result<(), SinkError> {
    let logger = global_logger().ok_or(SinkError::NoGlobalLogger)?;
    logger.log_args(level, args)
}

pub fn debug<S: AsRef<str>>(args: &[S]) -> Result<(), SinkError> {
    log(Level::Debug, args)
}

pub fn info<S: AsRef<str>>(args: &[S]) -> Result<(), SinkError> {
    log(Level::Info, args)
}

pub fn warn<S: AsRef<str>>(args: &[S]) -> Result<(), SinkError> {
    log(Level::Warn, args)
}

pub fn error<S: AsRef<str>>(args: &[S]) -> Result<(), SinkError> {
    log(Level::Error, args)
}

pub fn fatal<S: AsRef<str>>(args: &[S]) -> Result<(), SinkError> {
    log(Level::Fatal, args)
}
