//! Bounded retry with exponential backoff.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default number of attempts, the first one included.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wait before the first retry.
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(2);

/// Default ceiling for any single wait.
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// How often and how patiently to retry a failing operation.
///
/// The wait before retry `n` (1-based) is `base_delay * 2^(n-1)`, clamped to
/// `[base_delay, max_delay]`: 2s, 4s, 8s, 16s, 30s, 30s, ... with the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
        }
    }

    /// Wait before retry number `retry` (1 = the wait after the first failure).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        let delay = self
            .base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay);
        delay.max(self.base_delay).min(self.max_delay.max(self.base_delay))
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or attempts run out.
    ///
    /// `operation` receives the 1-based attempt number. Before each retry a
    /// warning naming the upcoming attempt is logged and the task sleeps for
    /// [`delay_for`](Self::delay_for). The sleep blocks the calling task;
    /// there is no cancellation hook other than dropping the future.
    pub async fn run<T, E, F, Fut, P>(
        &self,
        label: &str,
        is_retryable: P,
        mut operation: F,
    ) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let error = match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if attempt >= max_attempts || !is_retryable(&error) {
                return Err(error);
            }

            let delay = self.delay_for(attempt);
            warn!(
                "{} failed: {}. Starting attempt {}/{} in {:.1}s",
                label,
                error,
                attempt + 1,
                max_attempts,
                delay.as_secs_f64()
            );
            drop(error);

            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
