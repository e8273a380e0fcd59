//! Prometheus metrics backend for uniq locks.
//!
//! [`PrometheusMetrics`] implements [`uniq_core::MetricsBackend`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use uniq_core::{LockHooks, LockProtocol, MemoryStore};
//! use uniq_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let protocol = LockProtocol::new(Arc::new(MemoryStore::new()))
//!     .with_metrics(Arc::new(metrics.clone()));
//! let _hooks = LockHooks::with_default_identity(protocol);
//!
//! // Serve `metrics.gather()` from your own `/metrics` endpoint:
//! let encoder = uniq_prometheus::TextEncoder::new();
//! let _body = encoder.encode_to_string(&metrics.gather())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `uniq_lock_acquires_total{job_type, outcome}` - Counter (`granted` | `denied`)
//! - `uniq_lock_releases_total{job_type, outcome}` - Counter (`released` | `missing` | `failed`)
//! - `uniq_store_errors_total{op, kind}` - Counter
mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
