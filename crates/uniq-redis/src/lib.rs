//! Redis-backed lock store.
//!
//! Lock primitives map onto single Redis commands:
//! - set if absent: `SET key value NX`
//! - set if absent with expiry: `SET key value NX EX secs` (atomic)
//! - set expiry: `EXPIRE key secs`
//! - delete: `DEL key`
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use uniq_core::{LockHooks, LockProtocol};
//! use uniq_redis::{RedisStore, RedisStoreConfig};
//!
//! # fn main() -> Result<(), uniq_redis::RedisStoreError> {
//! let store = RedisStore::new(&RedisStoreConfig::default())?;
//! let hooks = LockHooks::with_default_identity(LockProtocol::new(Arc::new(store)));
//! # Ok(())
//! # }
//! ```
mod config;
pub use config::RedisStoreConfig;

mod error;
pub use error::RedisStoreError;

mod store;
pub use store::RedisStore;
