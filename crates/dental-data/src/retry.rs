//! Retry policies for fetch operations.

use crate::FetchError;
use std::future::Future;
use std::time::Duration;

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Delay grows by `step` after each failed attempt.
    Linear { step: Duration },
}

impl BackoffStrategy {
    /// Delay before retry number `retry` (1 for the first retry).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Linear { step } => step.saturating_mul(retry),
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Linear {
            step: Duration::from_millis(500),
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: BackoffStrategy::default(),
        }
    }

    /// Single attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: BackoffStrategy::None,
        }
    }

    /// Policy for loading the category list: three attempts, 500 ms linear.
    pub fn category_load() -> Self {
        Self::new(3)
    }

    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempts run out.
    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        self.run_with_sleep(op, sleep).await
    }

    /// [`run`](Self::run) with an explicit sleep function.
    pub async fn run_with_sleep<T, F, Fut, S, SFut>(
        &self,
        mut op: F,
        mut sleep: S,
    ) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
        S: FnMut(Duration) -> SFut,
        SFut: Future<Output = ()>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if attempt >= self.max_attempts => {
                    tracing::warn!(attempts = attempt, error = %e, "Retries exhausted");
                    return Err(FetchError::RetriesExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
                Err(e) => {
                    let delay = self.backoff.delay_for_retry(attempt);
                    tracing::info!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying"
                    );
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::category_load()
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(delay: Duration) {
    tokio::time::sleep(delay).await;
}

// Spin components have no timer; retries run back to back.
#[cfg(target_arch = "wasm32")]
async fn sleep(_delay: Duration) {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    #[test]
    fn test_backoff_delays() {
        let linear = BackoffStrategy::default();
        assert_eq!(linear.delay_for_retry(1), Duration::from_millis(500));
        assert_eq!(linear.delay_for_retry(2), Duration::from_millis(1000));
        assert_eq!(
            BackoffStrategy::Fixed(Duration::from_millis(20)).delay_for_retry(5),
            Duration::from_millis(20)
        );
        assert_eq!(BackoffStrategy::None.delay_for_retry(3), Duration::ZERO);
    }

    #[test]
    fn test_attempts_at_least_one() {
        assert_eq!(RetryPolicy::new(0).max_attempts, 1);
        assert_eq!(RetryPolicy::category_load().max_attempts, 3);
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = &AtomicU32::new(0);
        let policy = RetryPolicy::new(3).with_backoff(BackoffStrategy::None);
        let result = policy
            .run(move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(FetchError::Timeout)
                } else {
                    Ok("categories")
                }
            })
            .await;
        assert_eq!(result, Ok("categories"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_attempts() {
        let slept = Mutex::new(Vec::new());
        let policy = RetryPolicy::category_load();
        let result: Result<(), _> = policy
            .run_with_sleep(
                || async {
                    Err(FetchError::HttpError {
                        status: 503,
                        message: "unavailable".into(),
                    })
                },
                |d| {
                    slept.lock().unwrap().push(d);
                    async {}
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(FetchError::RetriesExhausted { attempts: 3, .. })
        ));
        assert_eq!(
            *slept.lock().unwrap(),
            vec![Duration::from_millis(500), Duration::from_millis(1000)]
        );
    }

    #[tokio::test]
    async fn test_non_retryable_error_stops() {
        let calls = &AtomicU32::new(0);
        let result: Result<(), _> = RetryPolicy::new(5)
            .with_backoff(BackoffStrategy::None)
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(FetchError::ParseError("bad".into()))
            })
            .await;
        assert_eq!(result, Err(FetchError::ParseError("bad".into())));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
