use uniq_model::{DEFAULT_LOCK_PREFIX, JobArgs, LockKey};

use crate::identity::LockIdentity;

/// Default key derivation: `{prefix}{job_type}-{rendered args}`.
///
/// `lock:` + `Report` + `[1]` gives `lock:Report-[1]`.
pub fn default_lock_key(prefix: &str, job_type: &str, args: &JobArgs) -> LockKey {
    LockKey::new(format!("{prefix}{job_type}-{args}"))
}

/// Identity using the default key derivation and no expiry.
#[derive(Debug, Clone)]
pub struct DefaultIdentity {
    prefix: String,
}

impl DefaultIdentity {
    /// Identity with the standard `lock:` prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity with a custom key prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Key prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for DefaultIdentity {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_LOCK_PREFIX)
    }
}

impl LockIdentity for DefaultIdentity {
    fn lock_key(&self, job_type: &str, args: &JobArgs) -> LockKey {
        default_lock_key(&self.prefix, job_type, args)
    }
}
