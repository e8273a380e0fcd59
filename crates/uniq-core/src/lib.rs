//! Deduplication lock core.
//!
//! A job is locked when it is submitted and unlocked when it finishes, so that at most one
//! logically identical job is outstanding at any time:
//! - [`identity`] maps `(job type, args)` to a lock key and TTL;
//! - [`protocol`] acquires (set-if-absent) and releases (delete) lock records in a [`store`];
//! - [`hooks`] exposes the two integration points used by a scheduler: `before_submit` and `around_execute`.
pub mod error;
pub mod hooks;
pub mod identity;
pub mod metrics;
pub mod protocol;
pub mod store;

pub use error::{CoreError, ExecuteError};
pub use hooks::LockHooks;
pub use identity::{
    DefaultIdentity, FnIdentity, IdentityHandle, IdentityRegistry, LockIdentity, PolicyIdentity,
    ResolvedLock, default_lock_key,
};
pub use metrics::{
    LockOutcome, MetricsBackend, MetricsHandle, NoOpMetrics, ReleaseOutcome, noop_metrics,
};
pub use protocol::LockProtocol;
pub use store::{LockStore, MemoryStore, StoreError, StoreHandle, StoreOp};

pub mod prelude {
    pub use crate::error::{CoreError, ExecuteError};
    pub use crate::hooks::LockHooks;
    pub use crate::identity::{IdentityRegistry, LockIdentity};
    pub use crate::protocol::LockProtocol;
    pub use crate::store::{LockStore, MemoryStore, StoreError};
}
