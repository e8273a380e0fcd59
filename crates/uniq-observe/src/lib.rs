//! Logging setup for uniq services.
mod logger;
pub use logger::*;
