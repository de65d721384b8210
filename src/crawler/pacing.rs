//! Request pacing
//!
//! The traversal consults a [`Pacer`] before every fetch. The only policy
//! shipped is a fixed pause; a token bucket or per-host limiter can replace
//! it without touching the traversal.

use crate::config::CrawlerConfig;
use std::time::Duration;

/// Throttles outgoing requests
#[allow(async_fn_in_trait)]
pub trait Pacer {
    /// Waits until the next request may be sent
    async fn pause(&self);
}

/// Waits a fixed amount of time before every request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::from_millis(config.request_delay_ms)
    }

    /// No pause at all
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Pacer for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
