//! Retry policy for transient API failures.
//!
//! Shared by the auth, meal-fetch, and order-read flows. Authentication,
//! authorization, and not-found failures rethrow immediately; everything
//! else backs off exponentially (capped) between attempts.

use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::{Result, SavedFeastError};

/// Bounded-attempt retry with capped exponential backoff.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    /// Create a policy from retry configuration.
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }

    /// Maximum number of invocations, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Backoff before the attempt numbered `attempt` (1-based failures).
    fn delay_for(&self, attempt: u32) -> u64 {
        let factor = 1u64 << attempt.min(16);
        self.base_delay_ms
            .saturating_mul(factor)
            .min(self.max_delay_ms)
    }

    /// Run `op` until it succeeds, fails non-retryably, or attempts run
    /// out. The last error is returned on exhaustion.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_non_retryable() => return Err(e),
                Err(e) => {
                    attempt += 1;
                    if attempt >= self.max_attempts {
                        return Err(e);
                    }
                    let delay = e.retry_after_ms().unwrap_or_else(|| self.delay_for(attempt));
                    tracing::debug!(
                        "attempt {}/{} failed ({}), retrying in {}ms",
                        attempt,
                        self.max_attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
            }
        }
    }
}
