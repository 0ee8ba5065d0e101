//! Platform-agnostic reconnection math.
//!
//! Deliberately free of tokio so it can be unit tested without a runtime.

use std::time::Duration;

/// Linear backoff: attempt `n` waits `n * base`.
#[derive(Debug, Clone, Copy)]
pub struct BackoffState {
    attempts: u32,
    max_attempts: u32,
    base: Duration,
}

impl BackoffState {
    pub fn new(base: Duration, max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts,
            base,
        }
    }

    /// Called after a successful open.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Delay before attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base.saturating_mul(attempt)
    }

    /// Advance to the next attempt.
    ///
    /// Returns the attempt number and the delay to wait *before* performing
    /// it, or `None` once every attempt has been used.
    pub fn next_delay_and_advance(&mut self) -> Option<(u32, Duration)> {
        if self.is_exhausted() {
            return None;
        }
        self.attempts += 1;
        Some((self.attempts, self.delay_for(self.attempts)))
    }
}
