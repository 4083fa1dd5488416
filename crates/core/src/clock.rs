// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Upload timing uses monotonic instants; stage completion uses calendar
//! dates. Both come from the same clock so tests can pin them.

use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time and date
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;

    fn today(&self) -> NaiveDate;
}

/// Real system clock
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[derive(Clone, Copy)]
struct FakeTime {
    instant: Instant,
    date: NaiveDate,
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(FakeTime {
                instant: Instant::now(),
                date: NaiveDate::default(),
            })),
        }
    }

    /// Start the calendar on a specific date
    pub fn on(date: NaiveDate) -> Self {
        let clock = Self::new();
        clock.set_today(date);
        clock
    }

    /// Advance the clock by the given duration.
    ///
    /// The calendar moves forward by every whole day that elapses.
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let days = duration.as_secs() / 86_400;
        current.instant += duration;
        current.date = current
            .date
            .checked_add_days(chrono::Days::new(days))
            .unwrap_or(current.date);
    }

    /// Set the calendar date
    pub fn set_today(&self, date: NaiveDate) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.date = date;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).instant
    }

    fn today(&self) -> NaiveDate {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).date
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
