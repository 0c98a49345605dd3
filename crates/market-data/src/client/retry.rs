//! Retry policy with exponential backoff and jitter.

use std::time::Duration;

use rand::Rng;

/// Bounds on the number of attempts per call.
const MIN_ATTEMPTS: u32 = 1;
const MAX_ATTEMPTS: u32 = 5;

/// Backoff policy for transient transport failures.
///
/// The delay before retry `n` (0-based) is `base * multiplier^n`, capped at
/// `max_delay`, then shifted by a random offset of up to `jitter` times the
/// delay in either direction.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first one. Clamped to 1..=5.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Growth factor between retries.
    pub multiplier: f64,
    /// Fraction of the delay used as random jitter (0.5 means +/- 50%).
    pub jitter: f64,
    /// Upper bound for a single delay, before jitter.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1100),
            multiplier: 2.0,
            jitter: 0.5,
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Policy with the default backoff and the given attempt count.
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// A single attempt, no retries.
    pub fn no_retry() -> Self {
        Self::with_max_attempts(MIN_ATTEMPTS)
    }

    /// Attempt count after clamping to the supported range.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.clamp(MIN_ATTEMPTS, MAX_ATTEMPTS)
    }

    /// Delay before retry `attempt` (0-based) without jitter.
    pub fn base_delay_for(&self, attempt: u32) -> Duration {
        let scale = self.multiplier.powi(attempt as i32);
        let seconds = self.base_delay.as_secs_f64() * scale;
        Duration::from_secs_f64(seconds.min(self.max_delay.as_secs_f64()).max(0.0))
    }

    /// Delay before retry `attempt` (0-based), jitter applied.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay = self.base_delay_for(attempt);
        let spread = delay.as_secs_f64() * self.jitter.clamp(0.0, 1.0);
        if spread <= 0.0 {
            return delay;
        }

        let offset = rand::thread_rng().gen_range(-spread..=spread);
        Duration::from_secs_f64((delay.as_secs_f64() + offset).max(0.0))
    }
}
