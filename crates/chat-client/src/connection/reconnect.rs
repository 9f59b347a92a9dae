//! Reconnection policy
//!
//! Decides how long to wait before each new connection attempt and when to
//! give up.

use chat_common::ReconnectConfig;
use std::time::Duration;

/// Policy controlling reconnect attempts and backoff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Delay before the first reconnect attempt
    pub initial_delay: Duration,
    /// Upper bound for delay growth
    pub max_delay: Duration,
    /// Growth factor per consecutive failed attempt (1 = fixed delay)
    pub multiplier: u32,
    /// Consecutive attempts allowed without reaching Open; unbounded when `None`
    pub max_attempts: Option<u32>,
}

impl ReconnectPolicy {
    /// Fixed delay, unbounded attempts
    #[must_use]
    pub fn fixed(delay: Duration) -> Self {
        Self {
            initial_delay: delay,
            max_delay: delay,
            multiplier: 1,
            max_attempts: None,
        }
    }

    /// Exponential backoff capped at `max_delay`
    #[must_use]
    pub fn exponential(initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            initial_delay,
            max_delay: max_delay.max(initial_delay),
            multiplier: 2,
            max_attempts: None,
        }
    }

    /// Limit the number of consecutive attempts
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Delay before the given reconnect attempt, or `None` once attempts are exhausted.
    ///
    /// `attempt` is 1-based and counts attempts since the last successful open.
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        if let Some(max) = self.max_attempts {
            if attempt > max {
                return None;
            }
        }

        let mut delay = self.initial_delay;
        for _ in 1..attempt {
            if delay >= self.max_delay {
                break;
            }
            delay = delay.saturating_mul(self.multiplier.max(1));
        }
        Some(delay.min(self.max_delay.max(self.initial_delay)))
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::fixed(Duration::from_millis(3000))
    }
}

impl From<&ReconnectConfig> for ReconnectPolicy {
    fn from(config: &ReconnectConfig) -> Self {
        Self {
            initial_delay: Duration::from_millis(config.delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            multiplier: config.multiplier,
            max_attempts: config.max_attempts,
        }
    }
}

/// Called right before each reconnect attempt
pub trait ReconnectHook: Send + Sync {
    fn before_reconnect(&self, attempt: u32);
}

impl<F> ReconnectHook for F
where
    F: Fn(u32) + Send + Sync,
{
    fn before_reconnect(&self, attempt: u32) {
        self(attempt);
    }
}
