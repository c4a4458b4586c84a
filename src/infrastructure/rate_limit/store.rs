//! Rate-limit store trait and error types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while consulting a rate-limit store.
#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("Rate-limit store connection error: {0}")]
    ConnectionError(String),

    #[error("Rate-limit store operation error: {0}")]
    OperationError(String),
}

/// Result type for rate-limit store operations.
pub type RateLimitResult<T> = Result<T, RateLimitError>;

/// Fixed-window quota shared by every client identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Length of one window.
    pub window: Duration,
    /// Accepted submissions allowed per identifier and window.
    pub max_requests: u32,
}

impl RateLimitPolicy {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
        }
    }
}

impl Default for RateLimitPolicy {
    /// Five submissions per four minutes.
    fn default() -> Self {
        Self::new(Duration::from_secs(4 * 60), 5)
    }
}

/// Counts accepted submissions per client identifier in fixed windows.
///
/// Implementations must make the check-and-increment atomic per key, because
/// concurrent requests from the same client race on the same counter.
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::MemoryRateLimitStore`] - Process-local map
/// - [`crate::infrastructure::rate_limit::RedisRateLimitStore`] - Shared across processes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Records one submission attempt for `key` at `now`.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the attempt fits in the current window and was counted
    /// - `Ok(false)` if the identifier already used its quota
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError`] if the backing store is unreachable. Callers
    /// decide whether to fail open or closed.
    async fn check_and_increment(&self, key: &str, now: DateTime<Utc>) -> RateLimitResult<bool>;

    /// Checks if the store backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reports.
    fn backend(&self) -> &'static str;
}
