use std::time::{Duration, Instant};

/// Decides when something that runs at a fixed rate is due, based on elapsed wall-clock time.
///
/// Falling far behind (e.g. the window was dragged) doesn't cause a burst of catch-up ticks.
pub struct Cadence {
    interval: Duration,
    last: Instant,
}

impl Cadence {
    /// # Arguments
    /// * `hz` how many times per second; must be nonzero
    /// * `now` when counting starts
    pub fn from_hz(hz: u32, now: Instant) -> Self {
        Cadence {
            interval: Duration::from_secs(1) / hz,
            last: now,
        }
    }

    /// Whether a tick is due at `now`; if so the tick is consumed
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) < self.interval {
            return false;
        }
        self.last += self.interval;
        if now.saturating_duration_since(self.last) > self.interval {
            self.last = now;
        }
        true
    }

    /// Time left until the next tick is due
    pub fn remaining(&self, now: Instant) -> Duration {
        (self.last + self.interval).saturating_duration_since(now)
    }
}
