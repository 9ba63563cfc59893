//! Bounded retry with exponential backoff for the catalog fetch.
use std::fmt::Display;
use std::time::Duration;

use tracing::warn;

/// Retry bounds for one logical request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; `0` is treated as `1`.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub base_delay: Duration,
    /// Upper bound of the random jitter added to each delay.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_jitter: Duration::from_millis(250),
        }
    }
}

/// Largest doubling exponent applied to `base_delay`.
const MAX_BACKOFF_SHIFT: u32 = 10;

impl RetryPolicy {
    /// What: Backoff before retry number `retry` (1-based), without jitter.
    ///
    /// Details:
    /// - `base, 2*base, 4*base, ...`; the exponent is capped so the delay cannot overflow.
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let shift = retry.saturating_sub(1).min(MAX_BACKOFF_SHIFT);
        self.base_delay.saturating_mul(1u32 << shift)
    }

    /// Attempts actually made, never less than one.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Random jitter in `0..=max_jitter`.
    fn jitter(&self) -> Duration {
        let max_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::random_range(0..=max_ms))
        }
    }
}

/// What: Retry a network operation with exponential backoff on failure.
///
/// Inputs:
/// - `operation`: Async closure producing one attempt
/// - `policy`: Attempt bound and delays
///
/// Output:
/// - First success, or the error of the final attempt once the bound is reached.
///
/// Details:
/// - Sleeps `backoff(n) + jitter` between attempts; no sleep after the last one.
pub async fn retry_with_backoff<T, E, F, Fut>(
    mut operation: F,
    policy: &RetryPolicy,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.attempts();
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if attempt >= max_attempts {
                    return Err(e);
                }
                let delay = policy.backoff(attempt) + policy.jitter();
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "network request failed, retrying with exponential backoff"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
