use std::sync::Arc;

use prometheus::{CounterVec, Opts, Registry, proto::MetricFamily};

use uniq_core::{LockOutcome, MetricsBackend, ReleaseOutcome};

const NAMESPACE: &str = "uniq";

/// Prometheus metrics backend.
///
/// ## Label cardinality
/// - `job_type`: job type identifiers (never lock keys)
/// - `outcome`: fixed sets, see [`LockOutcome`] and [`ReleaseOutcome`]
/// - `op` / `kind`: store primitive and error category labels
#[derive(Clone)]
pub struct PrometheusMetrics {
    acquires: CounterVec,
    releases: CounterVec,
    store_errors: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a backend registering its collectors in `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let acquires = counter(
            &registry,
            "lock_acquires_total",
            "Lock acquire attempts at job submission",
            &["job_type", "outcome"],
        )?;
        let releases = counter(
            &registry,
            "lock_releases_total",
            "Lock releases after job execution",
            &["job_type", "outcome"],
        )?;
        let store_errors = counter(
            &registry,
            "store_errors_total",
            "Failed lock store calls",
            &["op", "kind"],
        )?;

        Ok(Self {
            acquires,
            releases,
            store_errors,
            registry,
        })
    }

    /// Create a backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

fn counter(
    registry: &Registry,
    name: &str,
    help: &str,
    labels: &[&str],
) -> Result<CounterVec, prometheus::Error> {
    let vec = CounterVec::new(Opts::new(name, help).namespace(NAMESPACE), labels)?;
    registry.register(Box::new(vec.clone()))?;
    Ok(vec)
}

impl MetricsBackend for PrometheusMetrics {
    fn record_acquire(&self, job_type: &str, outcome: LockOutcome) {
        self.acquires
            .with_label_values(&[job_type, outcome.as_label()])
            .inc();
    }

    fn record_release(&self, job_type: &str, outcome: ReleaseOutcome) {
        self.releases
            .with_label_values(&[job_type, outcome.as_label()])
            .inc();
    }

    fn record_store_error(&self, op: &str, kind: &str) {
        self.store_errors.with_label_values(&[op, kind]).inc();
    }
}
