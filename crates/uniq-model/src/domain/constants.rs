//! Well-known defaults shared by the lock identity and the stores.

/// Prefix prepended to every derived lock key.
///
/// The default derivation is `"{prefix}{job_type}-{args}"`, e.g. `lock:Report-[1]`.
pub const DEFAULT_LOCK_PREFIX: &str = "lock:";

/// Value written into the store for a held lock.
///
/// Only the presence of the record matters; the value is never read back.
pub const DEFAULT_LOCK_SENTINEL: &str = "1";

/// Longest TTL a store is asked for: 100 years, in seconds.
///
/// Longer TTLs are clamped to it so every store treats them alike.
pub const MAX_LOCK_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;
