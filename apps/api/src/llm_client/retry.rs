//! Bounded retry with pure exponential backoff (multiplier 2, no jitter).
//!
//! The wait between attempts is a `tokio::time::sleep`, so a pending retry only
//! parks the calling task. Dropping the returned future abandons the loop at its
//! next await point.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);
const BACKOFF_MULTIPLIER: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Never below 1.
    pub max_attempts: u32,
    /// Wait after the first failed attempt; doubled after every further failure.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
        }
    }

    /// Wait slept after failed attempt number `attempt` (1-based):
    /// `initial_delay * 2^(attempt - 1)`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        self.initial_delay
            .saturating_mul(BACKOFF_MULTIPLIER.saturating_pow(exponent))
    }
}

/// Terminal state of [`execute`]: every attempt failed. Carries the last failure.
#[derive(Debug)]
pub struct Exhausted<E> {
    pub attempts: u32,
    pub last: E,
}

/// Runs `action` until it succeeds or `policy.max_attempts` attempts have failed.
///
/// Every exit path either returns the first success or the final failure; a
/// failure is never swallowed.
pub async fn execute<T, E, F, Fut>(policy: &RetryPolicy, mut action: F) -> Result<T, Exhausted<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match action().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt >= max_attempts => {
                warn!(
                    "Attempt {}/{} failed, no retries left: {}",
                    attempt, max_attempts, error
                );
                return Err(Exhausted {
                    attempts: attempt,
                    last: error,
                });
            }
            Err(error) => {
                let delay = policy.delay_after(attempt);
                warn!(
                    "Attempt {}/{} failed, retrying after {}ms: {}",
                    attempt,
                    max_attempts,
                    delay.as_millis(),
                    error
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
