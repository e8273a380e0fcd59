use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;
use tokio::time::Instant;
use uniq_model::MAX_LOCK_TTL_SECS;

use crate::store::{LockStore, StoreError};

/// Single lock record.
#[derive(Debug)]
struct Record {
    value: String,
    expires_at: Option<Instant>,
}

impl Record {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// In-process lock store.
///
/// Records expire lazily: an expired record is dropped the next time its key is touched,
/// and every insert sweeps out all expired records.
/// Expiry uses [`tokio::time::Instant`], so a paused test clock drives it.
/// TTLs are clamped to [`MAX_LOCK_TTL_SECS`].
///
/// Clones share the same records, which makes it suitable for tests and single-process deployments.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, Record>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a live record exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.lock()
            .map(|mut records| live(&mut records, key, Instant::now()).is_some())
            .unwrap_or(false)
    }

    /// Value stored in the live record for `key`.
    pub fn value(&self, key: &str) -> Option<String> {
        let mut records = self.lock().ok()?;
        live(&mut records, key, Instant::now()).map(|r| r.value.clone())
    }

    /// Remaining lifetime of the record for `key`.
    ///
    /// `None` if the key is absent or never expires.
    pub fn expires_in(&self, key: &str) -> Option<Duration> {
        let mut records = self.lock().ok()?;
        let now = Instant::now();
        live(&mut records, key, now)?
            .expires_at
            .map(|at| at.saturating_duration_since(now))
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.lock()
            .map(|mut records| {
                let now = Instant::now();
                records.retain(|_, r| r.is_live(now));
                records.len()
            })
            .unwrap_or(0)
    }

    /// Returns `true` if the store holds no live records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Record>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Internal("memory store mutex poisoned".into()))
    }

    fn insert_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        let mut records = self.lock()?;
        let now = Instant::now();
        records.retain(|_, r| r.is_live(now));
        if records.contains_key(key) {
            return Ok(false);
        }
        records.insert(
            key.to_string(),
            Record {
                value: value.to_string(),
                expires_at: ttl.and_then(|ttl| expiry_at(now, ttl)),
            },
        );
        Ok(true)
    }
}

fn expiry_at(now: Instant, ttl: Duration) -> Option<Instant> {
    now.checked_add(ttl.min(Duration::from_secs(MAX_LOCK_TTL_SECS)))
}

/// Returns the live record for `key`, dropping it first if it has expired.
fn live<'a>(
    records: &'a mut HashMap<String, Record>,
    key: &str,
    now: Instant,
) -> Option<&'a mut Record> {
    if records.get(key).is_some_and(|r| !r.is_live(now)) {
        records.remove(key);
    }
    records.get_mut(key)
}

#[async_trait]
impl LockStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        self.insert_if_absent(key, value, None)
    }

    async fn set_expiry(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        let mut records = self.lock()?;
        let now = Instant::now();
        match live(&mut records, key, now) {
            Some(record) => {
                record.expires_at = expiry_at(now, ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        let mut records = self.lock()?;
        let now = Instant::now();
        let removed = live(&mut records, key, now).is_some();
        records.remove(key);
        Ok(u64::from(removed))
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut records = self.lock()?;
        Ok(live(&mut records, key, Instant::now()).is_some())
    }

    async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        self.insert_if_absent(key, value, Some(ttl))
    }
}
