//! Per-client submission quotas.
//!
//! Provides a [`RateLimitStore`] trait with two implementations:
//! - [`MemoryRateLimitStore`] - Process-local fixed-window map (default)
//! - [`RedisRateLimitStore`] - Shared counters for multi-process deployments

mod memory_store;
mod redis_store;
mod store;

pub use memory_store::{MemoryRateLimitStore, RateLimitEntry};
pub use redis_store::RedisRateLimitStore;
pub use store::{RateLimitError, RateLimitPolicy, RateLimitResult, RateLimitStore};

#[cfg(test)]
pub use store::MockRateLimitStore;
