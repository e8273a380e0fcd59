//! Lock identity: mapping a job invocation to a lock key and TTL.
//!
//! Identities are strategy objects injected into [`crate::LockHooks`]. The same identity must be
//! used at submission and at completion time, otherwise the release targets a different key and
//! the lock leaks.
mod default;
pub use default::{DefaultIdentity, default_lock_key};

mod func;
pub use func::FnIdentity;

mod policy;
pub use policy::PolicyIdentity;

mod registry;
pub use registry::IdentityRegistry;

use std::sync::Arc;

use uniq_model::{JobArgs, LockKey, LockTtl};

/// Lock key and TTL resolved for one job invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLock {
    pub key: LockKey,
    pub ttl: LockTtl,
}

/// Pure mapping from `(job type, args)` to a lock key and TTL.
///
/// Implementations must be deterministic: equal inputs yield equal keys.
/// Ignoring `args` in [`lock_key`](LockIdentity::lock_key) is allowed and widens the lock to
/// every invocation of the job type.
pub trait LockIdentity: Send + Sync {
    /// Lock key for the invocation.
    fn lock_key(&self, job_type: &str, args: &JobArgs) -> LockKey;

    /// Lock TTL for the invocation. Unbounded unless overridden.
    fn lock_ttl(&self, _job_type: &str, _args: &JobArgs) -> LockTtl {
        LockTtl::Unbounded
    }

    /// Resolve both key and TTL.
    fn resolve(&self, job_type: &str, args: &JobArgs) -> ResolvedLock {
        ResolvedLock {
            key: self.lock_key(job_type, args),
            ttl: self.lock_ttl(job_type, args),
        }
    }
}

/// Shared handle to a lock identity.
pub type IdentityHandle = Arc<dyn LockIdentity>;
