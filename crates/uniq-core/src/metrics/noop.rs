use crate::metrics::backend::{LockOutcome, MetricsBackend, ReleaseOutcome};

/// No-op metrics backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_acquire(&self, _: &str, _: LockOutcome) {}

    #[inline(always)]
    fn record_release(&self, _: &str, _: ReleaseOutcome) {}

    #[inline(always)]
    fn record_store_error(&self, _: &str, _: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_metrics_is_zero_size() {
        assert_eq!(std::mem::size_of::<NoOpMetrics>(), 0);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(LockOutcome::Granted.as_label(), "granted");
        assert_eq!(LockOutcome::Denied.as_label(), "denied");
        assert_eq!(ReleaseOutcome::Released.as_label(), "released");
        assert_eq!(ReleaseOutcome::Missing.as_label(), "missing");
        assert_eq!(ReleaseOutcome::Failed.as_label(), "failed");
    }
}
