//! Rate limiting port.
//!
//! Tracker adapters call [`RateLimitPolicy::after_call`] once after every
//! live remote call. The shipped policy is a constant pause; an adaptive
//! policy reading the remote quota headers can replace it without touching
//! the driver.

use std::time::Duration;

use async_trait::async_trait;

/// Pause policy applied between remote calls.
#[async_trait]
pub trait RateLimitPolicy: Send + Sync + std::fmt::Debug {
    /// Waits as long as the policy requires before the next call may be issued.
    async fn after_call(&self);
}

/// Constant delay after every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub const fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// No pause at all.
    pub const fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::from_millis(1_000)
    }
}

#[async_trait]
impl RateLimitPolicy for FixedDelay {
    async fn after_call(&self) {
        if !self.delay.is_zero() {
            tracing::trace!(delay_ms = self.delay.as_millis() as u64, "rate limit pause");
            tokio::time::sleep(self.delay).await;
        }
    }
}
