//! Retry with exponential backoff for store reads

use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// How often and how patiently to retry a failing store read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Delay before the retry that follows failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1 << exponent)
    }

    /// Run `operation` until it succeeds or attempts run out.
    ///
    /// `on_retry` is called with the failed attempt number before each wait.
    /// The last error is returned unchanged.
    pub async fn run<T, F, Fut>(
        &self,
        name: &str,
        mut operation: F,
        mut on_retry: impl FnMut(u32),
    ) -> crate::error::Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = crate::error::Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "{} failed (attempt {}/{}), retrying in {}ms: {}",
                        name,
                        attempt,
                        max_attempts,
                        delay.as_millis(),
                        e
                    );
                    on_retry(attempt);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let calls = AtomicU32::new(0);
        let mut retries = Vec::new();

        let value = policy
            .run(
                "flaky read",
                || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if n < 2 {
                            anyhow::bail!("connection reset");
                        }
                        Ok(n)
                    }
                },
                |attempt| retries.push(attempt),
            )
            .await
            .unwrap();

        assert_eq!(value, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(retries, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_gives_up_with_last_error() {
        let policy = RetryPolicy::new(2, Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result: crate::error::Result<()> = policy
            .run(
                "broken read",
                || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move { anyhow::bail!("failure {}", n) }
                },
                |_| {},
            )
            .await;

        assert_eq!(result.unwrap_err().to_string(), "failure 1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        let value = policy.run("read", || async { Ok(7) }, |_| {}).await.unwrap();
        assert_eq!(value, 7);
    }
}
