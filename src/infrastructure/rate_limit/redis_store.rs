//! Redis-backed rate-limit store.

use super::store::{RateLimitError, RateLimitPolicy, RateLimitResult, RateLimitStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Client, Pipeline, aio::ConnectionManager};
use tracing::{debug, info};

/// Rate-limit store shared by every process connected to the same Redis.
///
/// Each identifier maps to a counter key that expires one window after the
/// first attempt. The key is created with its TTL and incremented in one
/// `MULTI`/`EXEC` transaction, so a counter never outlives its window, which gives the same fixed-window semantics as
/// [`super::MemoryRateLimitStore`] with Redis doing the eviction. Window
/// boundaries follow the Redis server clock, so `now` is not consulted.
pub struct RedisRateLimitStore {
    client: ConnectionManager,
    policy: RateLimitPolicy,
    key_prefix: String,
}

impl RedisRateLimitStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, policy: RateLimitPolicy) -> RateLimitResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            RateLimitError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            RateLimitError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| RateLimitError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis rate-limit store");

        Ok(Self {
            client: manager,
            policy,
            key_prefix: "rl:contact:".to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

/// `SET key 0 EX window NX` then `INCR key`, as one transaction.
///
/// `SET ... NX` only opens a window when none is running, and `INCR` keeps
/// the existing TTL.
fn window_pipeline(redis_key: &str, window_secs: u64) -> Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("SET")
        .arg(redis_key)
        .arg(0)
        .arg("EX")
        .arg(window_secs)
        .arg("NX")
        .ignore()
        .incr(redis_key, 1);
    pipe
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn check_and_increment(&self, key: &str, _now: DateTime<Utc>) -> RateLimitResult<bool> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        let window_secs = self.policy.window.as_secs().max(1);

        let (count,): (u64,) = window_pipeline(&redis_key, window_secs)
            .query_async(&mut conn)
            .await
            .map_err(|e| RateLimitError::OperationError(format!("INCR failed: {}", e)))?;

        let allowed = count <= u64::from(self.policy.max_requests);
        debug!("Rate-limit {}: attempt {} (allowed: {})", key, count, allowed);

        Ok(allowed)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(pipe: &Pipeline) -> String {
        String::from_utf8_lossy(&pipe.get_packed_pipeline()).into_owned()
    }

    #[test]
    fn test_window_pipeline_is_one_transaction() {
        let commands = packed(&window_pipeline("rl:contact:unknown", 240));

        let multi = commands.find("MULTI").unwrap();
        let set = commands.find("SET").unwrap();
        let incr = commands.find("INCR").unwrap();
        let exec = commands.find("EXEC").unwrap();

        assert!(multi < set && set < incr && incr < exec);
    }

    #[test]
    fn test_window_pipeline_sets_ttl_only_for_new_keys() {
        let commands = packed(&window_pipeline("rl:contact:203.0.113.7", 240));

        assert!(commands.contains("rl:contact:203.0.113.7"));
        assert!(commands.contains("\r\nEX\r\n$3\r\n240\r\n"));
        assert!(commands.contains("NX"));
        assert!(!commands.contains("EXPIRE"));
    }
}
