//! Time sources for record timestamps.
//!
//! # Responsibility
//! - Provide wall-clock milliseconds and the current calendar day.
//! - Guarantee strictly increasing stamps per state owner.
//!
//! # Invariants
//! - `Stamper::next` never returns a value less than or equal to a previous
//!   value from the same stamper.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "now" for services.
pub trait Clock {
    /// Unix epoch milliseconds.
    fn now_ms(&self) -> i64;
    /// Local calendar day.
    fn today(&self) -> NaiveDate;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now_ms: i64,
}

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        Self { now_ms }
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }

    fn today(&self) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(self.now_ms)
            .map(|instant| instant.date_naive())
            .unwrap_or_default()
    }
}

/// Monotonic wrapper over a [`Clock`].
#[derive(Debug, Clone)]
pub struct Stamper<C: Clock> {
    clock: C,
    last: Option<i64>,
}

impl<C: Clock> Stamper<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, last: None }
    }

    /// Returns the next timestamp, bumped past the previous one if the clock
    /// has not moved (or moved backwards).
    pub fn next(&mut self) -> i64 {
        let now = self.clock.now_ms();
        let stamp = match self.last {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }

    /// Like [`Stamper::next`], but also strictly after `prev`, the stamp a
    /// record already carries.
    pub fn next_after(&mut self, prev: i64) -> i64 {
        let stamp = self.next().max(prev.saturating_add(1));
        self.last = Some(stamp);
        stamp
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
