//! Time source for timestamps and daily file selection

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Duration, Local, NaiveDateTime};

/// Source of the current local date and time
pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// The system's local wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to
///
/// Useful for exercising day rollover and retention deterministically.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NaiveDateTime> {
        self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Jump to an absolute time
    pub fn set(&self, time: NaiveDateTime) {
        *self.lock() = time;
    }

    /// Move forward by `delta`
    pub fn advance(&self, delta: Duration) {
        *self.lock() += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.lock()
    }
}
