//! Client-side advisory rate limiting using a sliding window
//!
//! Submission timestamps are persisted through a `StorageProvider` so the
//! window survives page reloads and multiple service instances sharing one
//! store. The limiter is advisory: the server enforces its own limits, and
//! any storage failure here fails open rather than blocking a user.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};

use crate::storage::StorageProvider;

/// Trailing window length
pub const WINDOW_DURATION_SECS: i64 = 60;

/// Submissions allowed inside one window
pub const MAX_SUBMISSIONS_PER_WINDOW: usize = 5;

/// Storage key for the persisted timestamp list
pub const SUBMISSION_HISTORY_KEY: &str = "crestline.intake.submission_history";

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Submission may proceed; the attempt has been recorded
    Allowed,
    /// Too many recent submissions; retry after the given number of seconds
    Limited { retry_after_secs: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed)
    }
}

/// Sliding-window limiter over persisted submission timestamps
pub struct RateLimiter {
    storage: Arc<dyn StorageProvider>,
    window_secs: i64,
    max_submissions: usize,
    key: String,
}

impl RateLimiter {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            storage,
            window_secs: WINDOW_DURATION_SECS,
            max_submissions: MAX_SUBMISSIONS_PER_WINDOW,
            key: SUBMISSION_HISTORY_KEY.to_string(),
        }
    }

    /// Override the window and count, for embedders with different quotas
    pub fn with_limits(mut self, window_secs: i64, max_submissions: usize) -> Self {
        self.window_secs = window_secs;
        self.max_submissions = max_submissions;
        self
    }

    /// Check the window and record the attempt when it is allowed
    ///
    /// Rejected attempts are not recorded, so a throttled user's retry-after
    /// does not keep growing while they wait.
    pub async fn check_and_record(&self) -> RateLimitDecision {
        let now = Utc::now().timestamp();

        let mut timestamps = match self.load_history().await {
            Ok(list) => list,
            Err(()) => {
                // Fail open: the server still enforces its own limits
                return RateLimitDecision::Allowed;
            }
        };

        timestamps.retain(|&ts| now - ts < self.window_secs);

        if timestamps.len() >= self.max_submissions {
            let oldest = timestamps.iter().copied().min().unwrap_or(now);
            let elapsed = (now - oldest).max(0);
            let retry_after = (self.window_secs - elapsed).clamp(1, self.window_secs);
            debug!(
                "Submission throttled: {} in the last {}s, retry in {}s",
                timestamps.len(),
                self.window_secs,
                retry_after
            );
            return RateLimitDecision::Limited {
                retry_after_secs: retry_after as u64,
            };
        }

        timestamps.push(now);
        self.store_history(&timestamps).await;

        RateLimitDecision::Allowed
    }

    /// Clear the recorded history
    pub async fn reset(&self) {
        if let Err(err) = self.storage.remove(&self.key).await {
            warn!("Failed to clear submission history: {}", err);
        }
    }

    async fn load_history(&self) -> std::result::Result<Vec<i64>, ()> {
        let raw = match self.storage.get(&self.key).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Submission history read failed, allowing: {}", err);
                return Err(());
            }
        };

        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<i64>>(&raw) {
            Ok(list) => Ok(list),
            Err(err) => {
                // Corrupt history is discarded rather than trusted
                debug!("Discarding unreadable submission history: {}", err);
                Ok(Vec::new())
            }
        }
    }

    async fn store_history(&self, timestamps: &[i64]) {
        let serialized = match serde_json::to_string(timestamps) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!("Failed to serialize submission history: {}", err);
                return;
            }
        };
        if let Err(err) = self.storage.set(&self.key, &serialized).await {
            warn!("Submission history write failed, allowing: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, ServiceError};
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;

    struct BrokenStorage;

    #[async_trait]
    impl StorageProvider for BrokenStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(ServiceError::internal("storage offline"))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(ServiceError::internal("storage offline"))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Err(ServiceError::internal("storage offline"))
        }
    }

    #[tokio::test]
    async fn test_first_five_allowed_sixth_limited() {
        let limiter = RateLimiter::new(Arc::new(MemoryStorage::new()));

        for i in 0..5 {
            assert!(
                limiter.check_and_record().await.is_allowed(),
                "submission {} should be allowed",
                i + 1
            );
        }

        match limiter.check_and_record().await {
            RateLimitDecision::Limited { retry_after_secs } => {
                assert!(retry_after_secs >= 1);
                assert!(retry_after_secs <= WINDOW_DURATION_SECS as u64);
            }
            RateLimitDecision::Allowed => panic!("sixth submission should be limited"),
        }
    }

    #[tokio::test]
    async fn test_rejected_attempts_are_not_recorded() {
        let storage = Arc::new(MemoryStorage::new());
        let limiter = RateLimiter::new(storage.clone());

        for _ in 0..5 {
            limiter.check_and_record().await;
        }
        limiter.check_and_record().await;
        limiter.check_and_record().await;

        let raw = storage.get(SUBMISSION_HISTORY_KEY).await.unwrap().unwrap();
        let history: Vec<i64> = serde_json::from_str(&raw).unwrap();
        assert_eq!(history.len(), 5);
    }

    #[tokio::test]
    async fn test_old_timestamps_fall_out_of_window() {
        let storage = Arc::new(MemoryStorage::new());
        let now = Utc::now().timestamp();
        let stale: Vec<i64> = (0..5).map(|i| now - WINDOW_DURATION_SECS - i).collect();
        storage
            .set(SUBMISSION_HISTORY_KEY, &serde_json::to_string(&stale).unwrap())
            .await
            .unwrap();

        let limiter = RateLimiter::new(storage);
        assert!(limiter.check_and_record().await.is_allowed());
    }

    #[tokio::test]
    async fn test_retry_after_counts_down_to_oldest_exit() {
        let storage = Arc::new(MemoryStorage::new());
        let now = Utc::now().timestamp();
        let recent: Vec<i64> = (0..5).map(|i| now - 50 + i).collect();
        storage
            .set(SUBMISSION_HISTORY_KEY, &serde_json::to_string(&recent).unwrap())
            .await
            .unwrap();

        let limiter = RateLimiter::new(storage);
        match limiter.check_and_record().await {
            RateLimitDecision::Limited { retry_after_secs } => {
                // Oldest entry is 50 seconds old, so it exits in about 10
                assert!((9..=11).contains(&retry_after_secs));
            }
            RateLimitDecision::Allowed => panic!("should be limited"),
        }
    }

    #[tokio::test]
    async fn test_storage_failure_fails_open() {
        let limiter = RateLimiter::new(Arc::new(BrokenStorage));
        for _ in 0..10 {
            assert!(limiter.check_and_record().await.is_allowed());
        }
    }

    #[tokio::test]
    async fn test_corrupt_history_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(SUBMISSION_HISTORY_KEY, "not json at all")
            .await
            .unwrap();

        let limiter = RateLimiter::new(storage);
        assert!(limiter.check_and_record().await.is_allowed());
    }

    #[tokio::test]
    async fn test_reset_clears_history() {
        let storage = Arc::new(MemoryStorage::new());
        let limiter = RateLimiter::new(storage.clone());

        for _ in 0..5 {
            limiter.check_and_record().await;
        }
        limiter.reset().await;
        assert!(limiter.check_and_record().await.is_allowed());
    }

    #[tokio::test]
    async fn test_custom_limits() {
        let limiter = RateLimiter::new(Arc::new(MemoryStorage::new())).with_limits(60, 2);
        assert!(limiter.check_and_record().await.is_allowed());
        assert!(limiter.check_and_record().await.is_allowed());
        assert!(!limiter.check_and_record().await.is_allowed());
    }
}
