//! Injected time source.
//!
//! Posting-date validation depends on "today". The engine takes the time
//! through this trait so tests can pin the financial-year boundary.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// A source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current calendar date.
    fn today(&self) -> NaiveDate;

    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Production clock backed by the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    #[must_use]
    pub const fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.instant.date()
    }

    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}
