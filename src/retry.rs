//! Bounded retry policy with exponential backoff and jitter
//!
//! Only the commit-SHA lookup needs retries (tag refs lag behind release
//! publication on the hosting side), so the policy lives in one small
//! reusable type instead of a general retry framework. The jitter source
//! is injectable so delay schedules are deterministic under test.

use rand::Rng;
use std::time::Duration;

/// Retry policy: bounded attempts, doubling delay, capped jitter
#[derive(Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each attempt after that
    pub base_delay: Duration,
    /// Upper bound on the random jitter added to each delay
    pub max_jitter: Duration,
    /// Jitter source; returns a duration in `[0, max_jitter]`
    jitter: fn(Duration) -> Duration,
}

fn random_jitter(max: Duration) -> Duration {
    if max.is_zero() {
        return Duration::ZERO;
    }
    let millis = rand::thread_rng().gen_range(0..=max.as_millis() as u64);
    Duration::from_millis(millis)
}

impl RetryPolicy {
    /// Create a policy with the given bounds
    pub fn new(max_attempts: u32, base_delay: Duration, max_jitter: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_jitter,
            jitter: random_jitter,
        }
    }

    /// Replace the jitter source (for deterministic tests)
    pub fn with_jitter_source(mut self, jitter: fn(Duration) -> Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Delay to sleep after a failed attempt, or None when attempts are
    /// exhausted. `attempt` is zero-based.
    pub fn backoff(&self, attempt: u32) -> Option<Duration> {
        if attempt + 1 >= self.max_attempts {
            return None;
        }
        let exponential = self.base_delay * 2u32.saturating_pow(attempt);
        Some(exponential + (self.jitter)(self.max_jitter))
    }

    /// Run an async operation under this policy.
    ///
    /// Retries while `retryable` says the error is transient; the last
    /// error is surfaced once attempts run out.
    pub async fn run<T, E, F, Fut, R>(&self, mut operation: F, retryable: R) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        R: Fn(&E) -> bool,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !retryable(&err) {
                        return Err(err);
                    }
                    match self.backoff(attempt) {
                        Some(delay) => tokio::time::sleep(delay).await,
                        None => return Err(err),
                    }
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(1), Duration::from_secs(1))
    }
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("max_jitter", &self.max_jitter)
            .finish()
    }
}
