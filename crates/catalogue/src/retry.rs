use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::RetryConfig;

/// Resends a request that failed before the service answered. Responses
/// with an error status are not retried; those reach the caller as-is.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: usize,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: usize, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff: Duration::from_millis(initial_backoff_ms),
            max_backoff: Duration::from_millis(max_backoff_ms),
        }
    }

    /// Delay before the retry that follows the `failures`-th failed send.
    /// Doubles each time, capped at the maximum backoff.
    pub fn backoff_for(&self, failures: usize) -> Duration {
        let exponent = u32::try_from(failures.saturating_sub(1)).unwrap_or(u32::MAX);
        let factor = 1u32.checked_shl(exponent).unwrap_or(u32::MAX);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    pub async fn send<F, Fut, T, E>(&self, endpoint: &str, mut request: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut failures = 0;

        loop {
            let error = match request().await {
                Ok(response) => {
                    if failures > 0 {
                        debug!(endpoint, failures, "Request went through after resending");
                    }
                    return Ok(response);
                }
                Err(error) => error,
            };

            if failures == self.max_retries {
                if failures > 0 {
                    warn!(endpoint, failures = failures + 1, error = %error, "Giving up on request");
                }
                return Err(error);
            }

            failures += 1;
            let delay = self.backoff_for(failures);
            warn!(
                endpoint,
                retry = failures,
                of = self.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Transport error, resending"
            );
            sleep(delay).await;
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(
            config.max_retries,
            config.initial_backoff_ms,
            config.max_backoff_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let policy = RetryPolicy::from(&RetryConfig::default());
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let result: Result<(), String> = policy
            .send("dataModels/m1/dataClasses", || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err("connection refused".to_string())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let policy = RetryPolicy::new(3, 1, 2);
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let result: Result<usize, String> = policy
            .send("dataModels/m1/dataClasses", || async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n < 2 { Err("timeout".to_string()) } else { Ok(n) }
            })
            .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let policy = RetryPolicy::new(2, 1, 1);
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let result: Result<(), String> = policy
            .send("dataModels/m1/dataClasses", || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err("connection reset".to_string())
            })
            .await;

        assert_eq!(result, Err("connection reset".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_backoff_doubles_up_to_cap() {
        let policy = RetryPolicy::new(10, 500, 5000);

        assert_eq!(policy.backoff_for(1), Duration::from_millis(500));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(1000));
        assert_eq!(policy.backoff_for(4), Duration::from_millis(4000));
        assert_eq!(policy.backoff_for(5), Duration::from_millis(5000));
        assert_eq!(policy.backoff_for(64), Duration::from_millis(5000));
    }
}
