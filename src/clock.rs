// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wall-clock source.
//!
//! Both the `%T`/`%y`/... template controls and the rotation tag read the local wall
//! clock.  Going through [`Clock`] lets tests pin the time.

use chrono::{Local, NaiveDateTime};
use std::fmt::Debug;

/// A source of local wall-clock time.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system's local time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
