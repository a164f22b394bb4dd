//! Exponential backoff between failed price fetches.

use std::time::Duration;

use rand::Rng;

/// Delay schedule for consecutive fetch failures.
///
/// Starts at `initial`, multiplies by `multiplier` after each failure, and
/// never exceeds `max`. Up to 20% jitter is added so that workers started
/// together do not hammer the price source in lockstep.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    multiplier: f64,
    current: Duration,
    jitter: bool,
}

impl Backoff {
    #[must_use]
    pub fn new(initial: Duration, max: Duration, multiplier: f64) -> Self {
        Self {
            initial,
            max,
            multiplier,
            current: initial,
            jitter: true,
        }
    }

    /// Disable jitter, giving exact delays.
    #[must_use]
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Reset after a successful fetch.
    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    /// Return the delay for this failure and advance the schedule.
    pub fn next_delay(&mut self) -> Duration {
        let base = self.current;
        // Saturate at `max` when the product leaves `Duration`'s range.
        self.current = Duration::try_from_secs_f64(base.as_secs_f64() * self.multiplier.max(1.0))
            .map_or(self.max, |next| next.min(self.max));

        if self.jitter {
            base + self.jitter_for(base)
        } else {
            base
        }
    }

    fn jitter_for(&self, base: Duration) -> Duration {
        let range_ms = (base.as_millis() as u64) / 5;
        if range_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=range_ms))
    }
}
