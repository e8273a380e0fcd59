mod args;
pub use args::{JobArg, JobArgs};

mod key;
pub use key::LockKey;

mod ttl;
pub use ttl::LockTtl;

mod constants;
pub use constants::{DEFAULT_LOCK_PREFIX, DEFAULT_LOCK_SENTINEL, MAX_LOCK_TTL_SECS};

/// Identifier of a job type (e.g. `"Report"`, `"billing.sync"`).
///
/// Two jobs with the same type and the same arguments are considered logically identical.
pub type JobType = String;

/// Lock time-to-live in whole seconds.
pub type TtlSecs = u64;
