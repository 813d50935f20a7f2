//! Retry driver
//!
//! [`retry_forever`] blocks the calling task until the operation succeeds,
//! sleeping with a doubling, capped backoff between attempts. There is no
//! attempt ceiling and no jitter. [`attempt_once`] is the non-blocking
//! variant used by the keepalive path.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Backoff parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay after the first failure
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Exponential backoff state for one logical operation
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    current: Duration,
    max: Duration,
}

impl Backoff {
    /// Start a fresh backoff
    pub fn new(policy: RetryPolicy) -> Self {
        let initial = policy.initial_delay.min(policy.max_delay);
        Backoff {
            initial,
            current: initial,
            max: policy.max_delay,
        }
    }

    /// Delay to wait now; doubles the next one up to the cap
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2).min(self.max);
        delay
    }

    /// Delay the next call to [`Backoff::next_delay`] returns
    pub fn peek(&self) -> Duration {
        self.current
    }

    /// Back to the initial delay
    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

/// Run `operation` until it succeeds
pub async fn retry_forever<T, E, F, Fut>(label: &str, policy: RetryPolicy, mut operation: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut backoff = Backoff::new(policy);
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(operation = label, attempts = attempt, "Succeeded after retrying");
                }
                return value;
            }
            Err(e) => {
                let delay = backoff.next_delay();
                warn!(
                    operation = label,
                    attempt,
                    error = %e,
                    retry_in_ms = delay.as_millis() as u64,
                    "{} failed, retrying",
                    label
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Single attempt; failures are logged and swallowed
pub async fn attempt_once<T, E, Fut>(label: &str, operation: Fut) -> Option<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    match operation.await {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(operation = label, error = %e, "{} failed", label);
            None
        }
    }
}
