use std::{ops::Range, time::Duration};

use tokio::time::sleep;

use crate::services::language_model::GenerationError;

/// Bounded attempt budget shared by the feature services.
///
/// Rate-limited calls wait `base_delay * (attempt + 1)` before the next
/// attempt. Other failures are handed back to the caller unless
/// `retry_unexpected` is set, in which case they wait `base_delay` and count
/// against the same budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub retry_unexpected: bool,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            retry_unexpected: false,
        }
    }

    pub fn retrying_unexpected(mut self) -> Self {
        self.retry_unexpected = true;
        self
    }

    pub fn attempts(&self) -> Range<u32> {
        0..self.max_attempts
    }

    pub fn is_last(&self, attempt: u32) -> bool {
        attempt + 1 >= self.max_attempts
    }

    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * (attempt + 1)
    }

    /// Fixed pause used between attempts that failed for reasons other than
    /// rate limiting.
    pub async fn pause(&self) {
        if !self.base_delay.is_zero() {
            sleep(self.base_delay).await;
        }
    }

    /// Decides whether a failed upstream call leaves room for another
    /// attempt. Sleeps for the matching delay and returns `Ok(())` when it
    /// does; otherwise hands the error back.
    pub async fn absorb(&self, attempt: u32, err: GenerationError) -> Result<(), GenerationError> {
        if self.is_last(attempt) {
            return Err(err);
        }

        match err {
            GenerationError::RateLimited(_) => {
                let wait = self.backoff(attempt);
                log::warn!(
                    "Rate limit hit on attempt {}/{}, waiting {:?}",
                    attempt + 1,
                    self.max_attempts,
                    wait
                );
                if !wait.is_zero() {
                    sleep(wait).await;
                }
                Ok(())
            }
            GenerationError::Other(ref msg) if self.retry_unexpected => {
                log::error!(
                    "Unexpected upstream error on attempt {}/{}: {}",
                    attempt + 1,
                    self.max_attempts,
                    msg
                );
                self.pause().await;
                Ok(())
            }
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_limited() -> GenerationError {
        GenerationError::classify("429 Too Many Requests")
    }

    #[test]
    fn test_backoff_grows_linearly() {
        let policy = RetryPolicy::new(5, Duration::from_secs(2));

        assert_eq!(policy.backoff(0), Duration::from_secs(2));
        assert_eq!(policy.backoff(1), Duration::from_secs(4));
        assert_eq!(policy.backoff(3), Duration::from_secs(8));
    }

    #[test]
    fn test_last_attempt_is_detected() {
        let policy = RetryPolicy::new(3, Duration::ZERO);

        assert_eq!(policy.attempts(), 0..3);
        assert!(!policy.is_last(1));
        assert!(policy.is_last(2));
    }

    #[tokio::test]
    async fn test_rate_limit_is_absorbed_until_last_attempt() {
        let policy = RetryPolicy::new(3, Duration::ZERO);

        assert!(policy.absorb(0, rate_limited()).await.is_ok());
        assert!(policy.absorb(1, rate_limited()).await.is_ok());

        let err = policy.absorb(2, rate_limited()).await.unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_other_errors_propagate_immediately_by_default() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let err = policy
            .absorb(0, GenerationError::classify("connection reset"))
            .await
            .unwrap_err();

        assert_eq!(err, GenerationError::Other("connection reset".to_string()));
    }

    #[tokio::test]
    async fn test_other_errors_are_retried_when_enabled() {
        let policy = RetryPolicy::new(5, Duration::ZERO).retrying_unexpected();

        assert!(policy
            .absorb(0, GenerationError::classify("connection reset"))
            .await
            .is_ok());
        assert!(policy
            .absorb(4, GenerationError::classify("connection reset"))
            .await
            .is_err());
    }
}
