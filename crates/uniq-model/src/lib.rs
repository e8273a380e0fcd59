mod domain;
pub use domain::{DEFAULT_LOCK_PREFIX, DEFAULT_LOCK_SENTINEL, MAX_LOCK_TTL_SECS};
pub use domain::{JobArg, JobArgs, JobType, LockKey, LockTtl, TtlSecs};

mod error;
pub use error::{ModelError, ModelResult};

mod spec;
pub use spec::Job;

mod strategy;
pub use strategy::KeyStrategy;

mod config;
pub use config::{LockConfig, LockPolicy};
