use std::{collections::HashMap, sync::Arc};

use uniq_model::{JobArgs, JobType, LockConfig, LockKey, LockTtl};

use crate::identity::{
    DefaultIdentity, IdentityHandle, LockIdentity, PolicyIdentity, ResolvedLock,
};

/// Per job type identity dispatch.
///
/// Job types without a registered identity use the fallback ([`DefaultIdentity`] unless replaced).
pub struct IdentityRegistry {
    fallback: IdentityHandle,
    by_type: HashMap<JobType, IdentityHandle>,
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityRegistry {
    /// Create a registry with the default identity as fallback.
    pub fn new() -> Self {
        Self {
            fallback: Arc::new(DefaultIdentity::default()),
            by_type: HashMap::new(),
        }
    }

    /// Build a registry from configuration.
    ///
    /// Every configured job type gets a [`PolicyIdentity`]; `cfg.default` becomes the fallback.
    pub fn from_config(cfg: &LockConfig) -> Self {
        let by_type = cfg
            .jobs
            .iter()
            .map(|(job_type, policy)| {
                let id: IdentityHandle =
                    Arc::new(PolicyIdentity::with_prefix(&cfg.prefix, policy.clone()));
                (job_type.clone(), id)
            })
            .collect();

        Self {
            fallback: Arc::new(PolicyIdentity::with_prefix(&cfg.prefix, cfg.default.clone())),
            by_type,
        }
    }

    /// Replace the fallback identity and return the updated registry.
    pub fn with_fallback(mut self, fallback: IdentityHandle) -> Self {
        self.fallback = fallback;
        self
    }

    /// Register (or replace) the identity used for `job_type`.
    pub fn register(&mut self, job_type: impl Into<JobType>, identity: IdentityHandle) {
        self.by_type.insert(job_type.into(), identity);
    }

    /// Identity applied to `job_type`.
    pub fn get(&self, job_type: &str) -> &IdentityHandle {
        self.by_type.get(job_type).unwrap_or(&self.fallback)
    }

    /// Returns `true` if `job_type` has its own identity.
    pub fn contains(&self, job_type: &str) -> bool {
        self.by_type.contains_key(job_type)
    }
}

impl LockIdentity for IdentityRegistry {
    fn lock_key(&self, job_type: &str, args: &JobArgs) -> LockKey {
        self.get(job_type).lock_key(job_type, args)
    }

    fn lock_ttl(&self, job_type: &str, args: &JobArgs) -> LockTtl {
        self.get(job_type).lock_ttl(job_type, args)
    }

    fn resolve(&self, job_type: &str, args: &JobArgs) -> ResolvedLock {
        self.get(job_type).resolve(job_type, args)
    }
}
