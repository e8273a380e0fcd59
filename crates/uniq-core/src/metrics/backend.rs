use std::sync::Arc;

/// Result of a submission-time acquire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    /// Lock record created; the job may be submitted.
    Granted,
    /// Lock already held; the submission is suppressed.
    Denied,
}

impl LockOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            LockOutcome::Granted => "granted",
            LockOutcome::Denied => "denied",
        }
    }
}

/// Result of a completion-time release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Lock record deleted.
    Released,
    /// No record was left to delete (expired through TTL or removed externally).
    Missing,
    /// The store call failed; the record may have leaked until its TTL.
    Failed,
}

impl ReleaseOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            ReleaseOutcome::Released => "released",
            ReleaseOutcome::Missing => "missing",
            ReleaseOutcome::Failed => "failed",
        }
    }
}

/// Backend metrics collection interface.
///
/// `job_type` labels come from job type identifiers, never from lock keys, to keep cardinality bounded.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record the outcome of an acquire attempt.
    fn record_acquire(&self, job_type: &str, outcome: LockOutcome);
    /// Record the outcome of a release.
    fn record_release(&self, job_type: &str, outcome: ReleaseOutcome);
    /// Record a failed store call.
    ///
    /// # Arguments
    /// - `op`: store primitive label (see [`crate::StoreOp::as_label`])
    /// - `kind`: error category (see [`crate::StoreError::kind`])
    fn record_store_error(&self, op: &str, kind: &str);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
