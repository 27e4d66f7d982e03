use std::time::Duration;

/// Capped exponential sleep used by the scheduler's polling loops.
#[derive(Clone, Copy, Debug)]
pub struct PollBackoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl PollBackoff {
    /// Start at `initial`, doubling after every wait up to `max`.
    pub fn new(initial: Duration, max: Duration) -> Self {
        let initial = initial.min(max);
        Self {
            initial,
            max,
            current: initial,
        }
    }

    /// Interval the next [`PollBackoff::wait`] will sleep for.
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Sleep for the current interval, then grow it.
    pub fn wait(&mut self) {
        std::thread::sleep(self.current);
        self.advance();
    }

    /// Restart from the initial interval.
    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    fn advance(&mut self) {
        self.current = self.current.saturating_mul(2).min(self.max);
    }
}
