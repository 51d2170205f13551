use std::time::Duration;

/// Bounded attempt count with a fixed or linearly growing pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    increment: Duration,
}

impl RetryPolicy {
    /// `max_attempts` counts the first call and is raised to 1 if zero.
    pub fn new(max_attempts: u32, delay: Duration, increment: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            increment,
        }
    }

    #[cfg(test)]
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::new(max_attempts, delay, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause after the failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.delay
            .saturating_add(self.increment.saturating_mul(attempt.saturating_sub(1)))
    }

    /// Whether another attempt may follow attempt number `attempt`.
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}
