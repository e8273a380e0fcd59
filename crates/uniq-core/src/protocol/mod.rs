//! Acquire/release protocol over a [`LockStore`].
//!
//! Acquire is a single set-if-absent (plus expiry when the TTL is finite); release is a delete.
//! Neither call waits, retries or swallows store failures.
use std::{fmt, sync::Arc};

use tracing::{debug, instrument, trace};
use uniq_model::{DEFAULT_LOCK_SENTINEL, LockKey, LockTtl};

use crate::{
    error::CoreError,
    metrics::{MetricsHandle, noop_metrics},
    store::{StoreError, StoreHandle, StoreOp},
};

/// Lock protocol bound to a store.
///
/// Cheap to clone: clones share the store and metrics handles.
#[derive(Clone)]
pub struct LockProtocol {
    store: StoreHandle,
    metrics: MetricsHandle,
    sentinel: Arc<str>,
}

impl LockProtocol {
    /// Create a protocol over `store` with no-op metrics and the default sentinel.
    pub fn new(store: StoreHandle) -> Self {
        Self {
            store,
            metrics: noop_metrics(),
            sentinel: Arc::from(DEFAULT_LOCK_SENTINEL),
        }
    }

    /// Replace the metrics backend and return updated protocol.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replace the value written into lock records and return updated protocol.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = Arc::from(sentinel.into());
        self
    }

    /// Underlying store.
    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Metrics backend.
    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    /// Try to take the lock for `key`.
    ///
    /// Returns `Ok(false)` when the key is already held; that is the expected denial, not an error.
    /// With a finite `ttl` the record is created with an expiry, atomically if the store supports it.
    #[instrument(level = "trace", skip_all, fields(store = self.store.name(), key = %key, ttl = %ttl))]
    pub async fn acquire(&self, key: &LockKey, ttl: LockTtl) -> Result<bool, CoreError> {
        let granted = match ttl.as_duration() {
            None => self
                .store
                .set_if_absent(key.as_str(), &self.sentinel)
                .await
                .map_err(|e| self.failure(StoreOp::SetIfAbsent, key, e))?,
            Some(expiry) => self
                .store
                .set_if_absent_with_expiry(key.as_str(), &self.sentinel, expiry)
                .await
                .map_err(|e| self.failure(StoreOp::SetIfAbsentWithExpiry, key, e))?,
        };

        if granted {
            debug!("lock acquired");
        } else {
            trace!("lock already held");
        }
        Ok(granted)
    }

    /// Delete the lock record for `key`.
    ///
    /// Idempotent: returns `Ok(false)` if there was nothing to delete (e.g. the TTL already fired).
    #[instrument(level = "trace", skip_all, fields(store = self.store.name(), key = %key))]
    pub async fn release(&self, key: &LockKey) -> Result<bool, CoreError> {
        let removed = self
            .store
            .delete(key.as_str())
            .await
            .map_err(|e| self.failure(StoreOp::Delete, key, e))?;

        debug!(removed, "lock released");
        Ok(removed > 0)
    }

    /// Returns `true` if a record for `key` is present.
    pub async fn is_locked(&self, key: &LockKey) -> Result<bool, CoreError> {
        self.store
            .exists(key.as_str())
            .await
            .map_err(|e| self.failure(StoreOp::Exists, key, e))
    }

    fn failure(&self, op: StoreOp, key: &LockKey, source: StoreError) -> CoreError {
        self.metrics.record_store_error(op.as_label(), source.kind());
        CoreError::Store {
            op,
            key: key.to_string(),
            source,
        }
    }
}

impl fmt::Debug for LockProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockProtocol")
            .field("store", &self.store.name())
            .field("sentinel", &self.sentinel)
            .field("metrics", &"<handle>")
            .finish()
    }
}
