//! Per-host request spacing so a wide ingredient fan-out doesn't trip the
//! catalog's throttling.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Reserves request slots per host, at least `min_delay` apart.
pub struct RateLimiter {
    min_delay: Duration,
    /// Next free slot per host.
    next_slot: DashMap<String, Instant>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            next_slot: DashMap::new(),
        }
    }

    /// A limiter that never waits.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.min_delay.is_zero()
    }

    /// Wait for this host's next slot.
    ///
    /// The slot is reserved before sleeping, so concurrent callers for the
    /// same host queue up instead of all firing once the first wait ends.
    /// Returns how long the caller waited.
    pub async fn wait(&self, host: &str) -> Duration {
        if !self.is_enabled() {
            return Duration::ZERO;
        }

        let now = Instant::now();
        let slot = {
            let mut entry = self.next_slot.entry(host.to_string()).or_insert(now);
            let slot = (*entry).max(now);
            *entry = slot + self.min_delay;
            slot
        };

        let waited = slot.saturating_duration_since(now);
        if !waited.is_zero() {
            tracing::debug!(host, waited_ms = waited.as_millis() as u64, "rate limited");
            sleep_until(slot).await;
        }
        waited
    }

    pub fn tracked_hosts(&self) -> usize {
        self.next_slot.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::disabled()
    }
}
