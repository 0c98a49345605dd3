//! Request pacing for the Alpha Vantage endpoint.
//!
//! Alpha Vantage enforces roughly one request per second. The limiter hands
//! out send slots one pacing interval apart: each caller reserves the next
//! free slot under a short lock and then sleeps until it arrives.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, warn};
use tokio::time::Instant;

/// Thread-safe pacing limiter shared by every request of one client.
///
/// Slots are reserved in call order, so concurrent tasks queue up behind
/// each other instead of racing for the same instant.
pub struct PacingLimiter {
    /// Earliest instant the next request may go out; `None` until first use.
    next_slot: Mutex<Option<Instant>>,
    interval: Duration,
}

impl PacingLimiter {
    /// Create a limiter allowing one request per `interval`.
    ///
    /// The first request goes out immediately. A zero interval disables pacing.
    pub fn new(interval: Duration) -> Self {
        Self {
            next_slot: Mutex::new(None),
            interval,
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<Instant>> {
        self.next_slot.lock().unwrap_or_else(|poisoned| {
            warn!("Pacing limiter mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Reserve the next free slot and return it.
    fn reserve(&self, now: Instant) -> Instant {
        let mut next_slot = self.lock_slot();
        let slot = next_slot.map_or(now, |next| next.max(now));
        *next_slot = Some(slot + self.interval);
        slot
    }

    /// Wait until a request may be sent.
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }

        let now = Instant::now();
        let slot = self.reserve(now);
        if slot > now {
            debug!("Pacing limiter: waiting {:?} before next request", slot - now);
            tokio::time::sleep_until(slot).await;
        }
    }

    /// Take the current slot if it is free, without waiting.
    pub fn try_acquire(&self) -> bool {
        if self.interval.is_zero() {
            return true;
        }

        let now = Instant::now();
        let mut next_slot = self.lock_slot();
        match *next_slot {
            Some(next) if next > now => false,
            _ => {
                *next_slot = Some(now + self.interval);
                true
            }
        }
    }
}
