//! Metrics collection abstraction for lock operations.
//!
//! Backends (prometheus, statsd, etc) implement [`MetricsBackend`] and are injected into
//! [`crate::LockProtocol`] with [`crate::LockProtocol::with_metrics`].
mod backend;
pub use backend::{LockOutcome, MetricsBackend, MetricsHandle, ReleaseOutcome};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
