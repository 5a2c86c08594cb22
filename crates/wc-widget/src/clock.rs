#![forbid(unsafe_code)]

//! Wall-clock source for the click handler.
//!
//! Production code reads local time through `chrono`; tests pin the time
//! with [`FixedClock`] so rendered messages are deterministic.

use std::cell::Cell;

use chrono::{Local, NaiveTime};

pub trait Clock {
    /// Current local time of day.
    fn now(&self) -> NaiveTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A manually-set clock for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: Cell<NaiveTime>,
}

impl FixedClock {
    #[must_use]
    pub fn new(time: NaiveTime) -> Self {
        Self {
            time: Cell::new(time),
        }
    }

    /// Clock pinned at `hour:minute`; out-of-range values fall back to midnight.
    #[must_use]
    pub fn at(hour: u32, minute: u32) -> Self {
        Self::new(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN))
    }

    pub fn set(&self, time: NaiveTime) {
        self.time.set(time);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.time.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveTime {
        (**self).now()
    }
}
