//! Request pacing between commit page requests.

use async_trait::async_trait;
use cgraph_common::{CgraphError, Result};
use cgraph_config::PacingConfig;
use governor::{DefaultDirectRateLimiter, Quota};
use std::num::NonZeroU32;
use std::time::Duration;

/// Waits between page requests to stay under the API rate limit.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Called after a page has been processed and before the next request.
    async fn pause(&self);
}

/// Sleeps for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Pace with `delay` between requests.
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured pause.
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Token bucket allowing a fixed number of requests per second.
#[derive(Debug)]
pub struct QuotaPacer {
    limiter: DefaultDirectRateLimiter,
}

impl QuotaPacer {
    /// Allow `per_second` requests per second.
    pub fn per_second(per_second: u32) -> Result<Self> {
        let rate = NonZeroU32::new(per_second)
            .ok_or_else(|| CgraphError::config("Rate limit must be greater than 0"))?;
        Ok(Self {
            limiter: DefaultDirectRateLimiter::direct(Quota::per_second(rate)),
        })
    }
}

#[async_trait]
impl Pacer for QuotaPacer {
    async fn pause(&self) {
        self.limiter.until_ready().await;
    }
}

/// Does not wait at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self) {}
}

/// Builds the pacer selected by the configuration: a token bucket when a
/// rate limit is set, otherwise the fixed delay (none when it is zero).
pub fn pacer_from_config(config: &PacingConfig) -> Result<Box<dyn Pacer>> {
    if let Some(rate) = config.rate_limit_per_sec {
        return Ok(Box::new(QuotaPacer::per_second(rate)?));
    }

    if config.page_delay_ms == 0 {
        Ok(Box::new(NoPacing))
    } else {
        Ok(Box::new(FixedDelay::new(config.page_delay())))
    }
}
