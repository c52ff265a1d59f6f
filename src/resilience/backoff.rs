use std::time::Duration;

/// Doubling delay between request attempts, capped at `max`, with a fixed attempt budget.
#[derive(Debug, Clone)]
pub struct Backoff {
    current: Duration,
    base: Duration,
    max: Duration,
    retries_left: u32,
    attempts: u32,
}

impl Backoff {
    #[must_use]
    pub fn new(base: Duration, max: Duration, attempts: u32) -> Self {
        Self {
            current: base,
            base,
            max,
            retries_left: attempts.saturating_sub(1),
            attempts,
        }
    }

    /// Delay before the next attempt, or `None` once the budget is spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.retries_left == 0 {
            return None;
        }
        self.retries_left -= 1;
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        Some(delay)
    }

    pub fn reset(&mut self) {
        self.current = self.base;
        self.retries_left = self.attempts.saturating_sub(1);
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_secs(4), 3)
    }
}
