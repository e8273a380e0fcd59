mod policy;
pub use policy::LockPolicy;

mod lock;
pub use lock::LockConfig;
