//! Redis key-value store built on `fred`.
//!
//! Values are stored as strings; list-valued keys use native Redis lists
//! with `RPUSH`/`LRANGE`/`LREM`. Commands are bound by the configured
//! command timeout and reconnection follows an exponential policy.

use std::time::Duration;

use async_trait::async_trait;
use fred::prelude::*;

use crate::config::DataSourceConfig;
use crate::error::{StoreError, StoreResult};
use crate::kv::KvStore;

/// Converts a `fred` error into a [`StoreError`].
///
/// Transport-level failures (including command timeouts) map to
/// [`StoreError::Unavailable`].
#[allow(clippy::needless_pass_by_value)]
fn from_redis_error(err: fred::error::Error) -> StoreError {
    match err.kind() {
        fred::error::ErrorKind::Config => StoreError::Configuration(err.to_string()),
        _ => StoreError::Unavailable(err.to_string()),
    }
}

/// Redis-backed [`KvStore`].
pub struct RedisKvStore {
    client: Client,
}

impl RedisKvStore {
    /// Connects to the store described by `config`.
    ///
    /// ## Errors
    ///
    /// Returns [`StoreError::Configuration`] for an invalid connection
    /// URL and [`StoreError::Unavailable`] when the connection cannot be
    /// established.
    pub async fn connect(config: &DataSourceConfig) -> StoreResult<Self> {
        let redis_config = Config::from_url(&config.connection_url())
            .map_err(|e| StoreError::Configuration(e.to_string()))?;

        let perf = PerformanceConfig {
            default_command_timeout: Duration::from_millis(config.command_timeout_ms),
            ..PerformanceConfig::default()
        };

        let client = Client::new(
            redis_config,
            Some(perf),
            None,
            Some(ReconnectPolicy::new_exponential(0, 1000, 30_000, 2)),
        );

        client.init().await.map_err(from_redis_error)?;

        Ok(Self { client })
    }

    /// Returns the underlying client.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.client.get(key).await.map_err(from_redis_error)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.client
            .set::<(), _, _>(key, value, None, None, false)
            .await
            .map_err(from_redis_error)
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let deleted: i64 = self.client.del(key).await.map_err(from_redis_error)?;
        Ok(deleted > 0)
    }

    async fn list_append(&self, key: &str, element: &str) -> StoreResult<()> {
        self.client
            .rpush::<(), _, _>(key, element)
            .await
            .map_err(from_redis_error)
    }

    async fn list_read(&self, key: &str) -> StoreResult<Vec<String>> {
        self.client
            .lrange(key, 0, -1)
            .await
            .map_err(from_redis_error)
    }

    async fn list_remove(&self, key: &str, element: &str) -> StoreResult<u64> {
        let removed: i64 = self
            .client
            .lrem(key, 0, element)
            .await
            .map_err(from_redis_error)?;
        Ok(u64::try_from(removed).unwrap_or_default())
    }
}
