//! Retry with exponential backoff for calls against the rate-limited NCBI API.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, warn};

use crate::error::{PubMedError, Result};

/// Exponential backoff policy
///
/// Delay after the failed attempt at index `i` is `base_delay * multiplier^i`,
/// so the defaults give 1s, 2s, 4s, 8s, 16s across the five attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (initial request included)
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub base_delay: Duration,
    /// Multiplier applied per attempt
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Policy with a custom base delay, for tests that cannot afford real
    /// multi-second sleeps
    pub fn with_base_delay(base_delay: Duration) -> Self {
        Self {
            base_delay,
            ..Self::default()
        }
    }

    /// Backoff delay after the failed attempt at `attempt_index` (0-based)
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        self.base_delay
            .mul_f64(self.multiplier.powi(attempt_index as i32))
    }
}

/// Execute an async operation, retrying transient failures per the policy.
///
/// Rate limiting (429), other error statuses, timeouts, and connection errors
/// all count as transient; the upstream API returns them interchangeably
/// under load. Permanent errors (parse failures, bad configuration) propagate
/// immediately. When all attempts fail the result is
/// [`PubMedError::RetriesExhausted`], which callers must not confuse with an
/// empty result set.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let start = std::time::Instant::now();
    let mut last_error = String::new();

    for attempt in 0..policy.max_attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                let delay = policy.delay_for(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transient API failure, backing off before retry"
                );
                last_error = e.to_string();
                sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }

    let elapsed = start.elapsed();
    error!(
        attempts = policy.max_attempts,
        elapsed_ms = elapsed.as_millis() as u64,
        last_error = %last_error,
        "Giving up after exhausting all retry attempts"
    );
    Err(PubMedError::RetriesExhausted {
        attempts: policy.max_attempts,
        elapsed,
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delay_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(8));
        assert_eq!(policy.delay_for(4), Duration::from_secs(16));
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let policy = RetryPolicy::with_base_delay(Duration::from_millis(10));
        let calls = AtomicU32::new(0);

        let result = with_retry(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok("payload") }
        })
        .await;

        assert_eq!(result.unwrap(), "payload");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_transient_then_succeeds() {
        let policy = RetryPolicy::with_base_delay(Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result = with_retry(&policy, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(PubMedError::RateLimited)
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_is_a_distinct_error() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            multiplier: 2.0,
        };
        let calls = AtomicU32::new(0);

        let result: Result<()> = with_retry(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(PubMedError::HttpStatus {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                })
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result {
            Err(PubMedError::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 3),
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let policy = RetryPolicy::with_base_delay(Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result: Result<()> = with_retry(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(PubMedError::XmlParse {
                    message: "truncated document".to_string(),
                })
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(PubMedError::XmlParse { .. })));
    }
}
