//! In-memory fixed-window rate-limit store.

use super::store::{RateLimitPolicy, RateLimitResult, RateLimitStore};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Per-identifier counter for the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: DateTime<Utc>,
}

/// A rate-limit store backed by a process-local map.
///
/// Expired entries are swept lazily on every check; there is no background
/// timer. State is lost on restart, and each process of a multi-process
/// deployment keeps its own quota. Use
/// [`crate::infrastructure::rate_limit::RedisRateLimitStore`] for a global one.
pub struct MemoryRateLimitStore {
    policy: RateLimitPolicy,
    window: TimeDelta,
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl MemoryRateLimitStore {
    pub fn new(policy: RateLimitPolicy) -> Self {
        debug!(
            "Using in-memory rate-limit store ({} per {}s)",
            policy.max_requests,
            policy.window.as_secs()
        );

        Self {
            policy,
            window: TimeDelta::from_std(policy.window).unwrap_or(TimeDelta::MAX),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of identifiers currently tracked.
    pub fn tracked(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, RateLimitEntry>> {
        // a poisoned map still holds valid counters
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryRateLimitStore {
    fn default() -> Self {
        Self::new(RateLimitPolicy::default())
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn check_and_increment(&self, key: &str, now: DateTime<Utc>) -> RateLimitResult<bool> {
        let mut entries = self.lock();

        let before = entries.len();
        // only entries strictly older than the window are expired
        entries.retain(|_, entry| now - entry.window_start <= self.window);
        if entries.len() < before {
            debug!("Evicted {} expired rate-limit entries", before - entries.len());
        }

        let entry = entries.entry(key.to_string()).or_insert(RateLimitEntry {
            count: 0,
            window_start: now,
        });

        if entry.count >= self.policy.max_requests {
            return Ok(false);
        }

        entry.count += 1;
        Ok(true)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
