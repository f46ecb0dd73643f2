//! Reference time sources.
//!
//! All engine times are seconds on a fixed reference timeline starting at
//! 2001-01-01T00:00:00Z. Main-phase motion is a function of this absolute
//! time, so two texts started at different moments stay phase-aligned.

use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z.
pub const REFERENCE_EPOCH_OFFSET: f64 = 978_307_200.0;

pub trait Clock {
    /// Current reference time in seconds.
    fn now(&self) -> f64;
}

/// Wall clock on the reference timeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        // A system clock set before 1970 reads as the Unix epoch.
        let unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        unix - REFERENCE_EPOCH_OFFSET
    }
}

/// A clock that only moves when told to. Used for headless rendering and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self { now: start }
    }

    pub fn set(&mut self, now: f64) {
        self.now = now;
    }

    /// Moves the clock forward by `dt` seconds and returns the new time.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.now += dt;
        self.now
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_past_the_reference_epoch() {
        // 2020-01-01 is roughly 599.6M seconds after the reference epoch.
        assert!(SystemClock.now() > 599_000_000.0);
    }

    #[test]
    fn manual_clock_advances() {
        let mut clock = ManualClock::new(10.0);
        assert_eq!(clock.now(), 10.0);
        assert_eq!(clock.advance(0.5), 10.5);
        clock.set(3.0);
        assert_eq!(clock.now(), 3.0);
    }
}
