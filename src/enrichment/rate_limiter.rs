//! Minimum interval between consecutive remote requests.
//!
//! Each caller reserves the next free slot under a short lock and then sleeps
//! until it, so the gap holds even when calls come from different call sites.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between requests.
#[derive(Debug)]
pub struct RateLimiter {
    name: String,
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// `name` labels log lines (e.g. "MusicBrainz").
    pub fn new(name: &str, interval: Duration) -> Self {
        Self {
            name: name.to_string(),
            interval,
            next_slot: Mutex::new(None),
        }
    }

    pub fn from_millis(name: &str, millis: u64) -> Self {
        Self::new(name, Duration::from_millis(millis))
    }

    /// A limiter that never waits.
    pub fn unlimited(name: &str) -> Self {
        Self::new(name, Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until at least `interval` has passed since the previous request.
    /// Must be called *before* making a request.
    pub async fn wait_if_needed(&self) {
        let now = Instant::now();
        let start = {
            let mut next = self.next_slot.lock();
            let start = match *next {
                Some(slot) if slot > now => slot,
                _ => now,
            };
            *next = Some(start + self.interval);
            start
        };

        if start > now {
            tracing::debug!(
                "[{}] Rate limiting: waiting {:.1}s",
                self.name,
                (start - now).as_secs_f64()
            );
            tokio::time::sleep_until(start).await;
        }
    }
}
