use serde::{Deserialize, Serialize};

use crate::{domain::LockTtl, strategy::KeyStrategy};

/// Lock identity policy for one job type.
///
/// Missing fields fall back to the default derivation: per-argument keys and no expiry.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LockPolicy {
    /// How the lock key is derived.
    pub key: KeyStrategy,
    /// How long an unreleased lock survives.
    pub ttl: LockTtl,
}

impl LockPolicy {
    /// Convenience constructor.
    pub fn new(key: KeyStrategy, ttl: LockTtl) -> Self {
        Self { key, ttl }
    }

    /// Replace the TTL and return the updated policy.
    pub fn with_ttl(mut self, ttl: LockTtl) -> Self {
        self.ttl = ttl;
        self
    }

    /// Replace the key strategy and return the updated policy.
    pub fn with_key(mut self, key: KeyStrategy) -> Self {
        self.key = key;
        self
    }
}
