//! Key-value store abstraction used by the lock protocol.
//!
//! The protocol needs exactly three primitives from a store:
//! - an atomic "set if absent";
//! - a best-effort "set expiry";
//! - an idempotent "delete".
//!
//! Stores that can set a value and its expiry in one atomic step should override
//! [`LockStore::set_if_absent_with_expiry`].
mod error;
pub use error::StoreError;

mod memory;
pub use memory::MemoryStore;

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;

/// Store primitive, used for error context and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    SetIfAbsent,
    SetExpiry,
    SetIfAbsentWithExpiry,
    Delete,
    Exists,
}

impl StoreOp {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            StoreOp::SetIfAbsent => "set_if_absent",
            StoreOp::SetExpiry => "set_expiry",
            StoreOp::SetIfAbsentWithExpiry => "set_if_absent_with_expiry",
            StoreOp::Delete => "delete",
            StoreOp::Exists => "exists",
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Shared key-value store holding lock records.
///
/// Only presence matters: values written by [`LockStore::set_if_absent`] are never read back.
/// Implementations must not retry internally; failures are returned to the caller as is.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Store name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Atomically write `key` if it is absent.
    ///
    /// Returns `true` iff the key was absent and is now set.
    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError>;

    /// Set a relative expiry on an existing key.
    ///
    /// Returns `false` if the key does not exist.
    async fn set_expiry(&self, key: &str, ttl: Duration) -> Result<bool, StoreError>;

    /// Remove `key`.
    ///
    /// Returns the number of removed records; removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<u64, StoreError>;

    /// Returns `true` if `key` is currently present.
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Write `key` if absent and make it expire after `ttl`.
    ///
    /// The default implementation issues [`set_if_absent`](LockStore::set_if_absent) followed by
    /// [`set_expiry`](LockStore::set_expiry). The two calls are not atomic: a failure or crash
    /// between them leaves a record without expiry.
    async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        if !self.set_if_absent(key, value).await? {
            return Ok(false);
        }
        self.set_expiry(key, ttl).await?;
        Ok(true)
    }
}

/// Shared handle to a lock store.
pub type StoreHandle = Arc<dyn LockStore>;
