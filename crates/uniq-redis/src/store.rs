use std::{fmt, time::Duration};

use async_trait::async_trait;
use redis::{Client, aio::MultiplexedConnection};
use tokio::sync::OnceCell;
use tracing::debug;
use uniq_core::{LockStore, StoreError};
use uniq_model::MAX_LOCK_TTL_SECS;

use crate::{
    config::RedisStoreConfig,
    error::{RedisStoreError, to_store_error},
};

/// [`LockStore`] backed by a Redis server.
///
/// A single multiplexed connection is opened lazily on first use and shared by all calls.
pub struct RedisStore {
    client: Client,
    conn: OnceCell<MultiplexedConnection>,
    atomic_expiry: bool,
}

impl RedisStore {
    /// Create a store from configuration. No connection is made until the first call.
    pub fn new(cfg: &RedisStoreConfig) -> Result<Self, RedisStoreError> {
        let client = Client::open(cfg.url.as_str()).map_err(|e| RedisStoreError::InvalidUrl {
            url: cfg.url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            conn: OnceCell::new(),
            atomic_expiry: cfg.atomic_expiry,
        })
    }

    /// Create a store for `url` with default options.
    pub fn open(url: &str) -> Result<Self, RedisStoreError> {
        Self::new(&RedisStoreConfig::with_url(url))
    }

    async fn connection(&self) -> Result<MultiplexedConnection, StoreError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                debug!("opening redis connection");
                self.client
                    .get_multiplexed_async_connection()
                    .await
                    .map_err(to_store_error)
            })
            .await?;
        Ok(conn.clone())
    }
}

/// Seconds for `EXPIRE` / `EX`; sub-second remainders round up so a lock never expires early.
/// Clamped to [`MAX_LOCK_TTL_SECS`], which redis accepts.
fn expiry_secs(ttl: Duration) -> u64 {
    ttl.as_secs()
        .saturating_add(u64::from(ttl.subsec_nanos() > 0))
        .min(MAX_LOCK_TTL_SECS)
}

#[async_trait]
impl LockStore for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .query_async(&mut conn)
            .await
            .map_err(to_store_error)?;
        Ok(reply.is_some())
    }

    async fn set_expiry(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        let mut conn = self.connection().await?;
        let updated: i64 = redis::cmd("EXPIRE")
            .arg(key)
            .arg(expiry_secs(ttl))
            .query_async(&mut conn)
            .await
            .map_err(to_store_error)?;
        Ok(updated == 1)
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.connection().await?;
        let removed: u64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(to_store_error)?;
        Ok(removed)
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection().await?;
        let found: i64 = redis::cmd("EXISTS")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(to_store_error)?;
        Ok(found > 0)
    }

    async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let secs = expiry_secs(ttl);
        // `SET .. EX 0` is rejected by redis; a zero TTL goes through the two-step path.
        if !self.atomic_expiry || secs == 0 {
            if !self.set_if_absent(key, value).await? {
                return Ok(false);
            }
            self.set_expiry(key, ttl).await?;
            return Ok(true);
        }

        let mut conn = self.connection().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(secs)
            .query_async(&mut conn)
            .await
            .map_err(to_store_error)?;
        Ok(reply.is_some())
    }
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("addr", &self.client.get_connection_info().addr)
            .field("connected", &self.conn.initialized())
            .field("atomic_expiry", &self.atomic_expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_rounds_up_partial_seconds() {
        assert_eq!(expiry_secs(Duration::from_secs(5)), 5);
        assert_eq!(expiry_secs(Duration::from_millis(1500)), 2);
        assert_eq!(expiry_secs(Duration::from_millis(1)), 1);
        assert_eq!(expiry_secs(Duration::ZERO), 0);
    }

    #[test]
    fn expiry_is_clamped_to_maximum() {
        assert_eq!(expiry_secs(Duration::from_secs(u64::MAX)), MAX_LOCK_TTL_SECS);
        assert_eq!(expiry_secs(Duration::MAX), MAX_LOCK_TTL_SECS);
    }

    #[test]
    fn rejects_invalid_url() {
        let err = RedisStore::open("not a url").unwrap_err();
        assert!(matches!(err, RedisStoreError::InvalidUrl { .. }));
    }

    #[test]
    fn opening_does_not_connect() {
        let store = RedisStore::open("redis://127.0.0.1:1/").unwrap();
        assert_eq!(store.name(), "redis");
        assert!(format!("{store:?}").contains("connected: false"));
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        let store = RedisStore::open("redis://127.0.0.1:1/").unwrap();
        let err = store.set_if_absent("lock:k", "1").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)), "got {err:?}");
    }
}
