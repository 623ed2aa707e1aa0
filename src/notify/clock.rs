// SPDX-License-Identifier: MPL-2.0
//! Countdown clock for a single toast's auto-dismiss timer.
//!
//! A clock is created when a toast first enters the visible set and only
//! counts down while the store ticks it. Pausing preserves the remaining
//! time; a paused clock resumes exactly where it left off.

use std::time::Duration;

/// Dismiss countdown for one visible toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissClock {
    remaining: Duration,
    paused: bool,
    expired: bool,
}

impl DismissClock {
    /// Creates a running clock with the full duration remaining.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            remaining: duration,
            paused: false,
            expired: duration.is_zero(),
        }
    }

    /// Advances the clock by `elapsed`.
    ///
    /// Returns `true` exactly once: on the tick that exhausts the remaining
    /// time. Paused and already-expired clocks are unaffected.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.paused || self.expired {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.expired = true;
            return true;
        }
        false
    }

    /// Suspends the countdown, preserving the remaining time.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes a suspended countdown.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Returns the time left before expiry.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Returns whether the countdown is currently suspended.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns whether the countdown has run out.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_expiry() {
        let mut clock = DismissClock::new(Duration::from_millis(250));
        assert!(!clock.tick(Duration::from_millis(100)));
        assert!(!clock.tick(Duration::from_millis(100)));
        assert!(clock.tick(Duration::from_millis(100)));
        assert!(clock.is_expired());
    }

    #[test]
    fn expiry_is_reported_once() {
        let mut clock = DismissClock::new(Duration::from_millis(50));
        assert!(clock.tick(Duration::from_millis(100)));
        assert!(!clock.tick(Duration::from_millis(100)));
    }

    #[test]
    fn pause_preserves_remaining_time() {
        let mut clock = DismissClock::new(Duration::from_millis(300));
        clock.tick(Duration::from_millis(100));
        clock.pause();

        // Paused ticks must not consume time.
        clock.tick(Duration::from_millis(500));
        assert_eq!(clock.remaining(), Duration::from_millis(200));
        assert!(!clock.is_expired());

        clock.resume();
        assert!(!clock.tick(Duration::from_millis(100)));
        assert!(clock.tick(Duration::from_millis(100)));
    }

    #[test]
    fn zero_duration_starts_expired() {
        let clock = DismissClock::new(Duration::ZERO);
        assert!(clock.is_expired());
    }
}
