//! Scheduler integration points.
//!
//! [`LockHooks`] composes a [`LockIdentity`] with a [`LockProtocol`] and exposes the two
//! operations a job scheduler calls:
//! - [`before_submit`](LockHooks::before_submit) at enqueue time, which takes the lock;
//! - [`around_execute`](LockHooks::around_execute) at run time, which runs the job body and releases the lock on every exit path.
//!
//! The hooks do not depend on any dispatch mechanism; see `uniq-exec` for a taskvisor adapter.
mod release;
use release::PendingRelease;

use std::{
    future::Future,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use futures_util::FutureExt;
use tracing::{debug, instrument, warn};
use uniq_model::{JobArgs, LockConfig};

use crate::{
    error::{CoreError, ExecuteError},
    identity::{DefaultIdentity, IdentityHandle, IdentityRegistry, ResolvedLock},
    metrics::{LockOutcome, MetricsHandle, ReleaseOutcome},
    protocol::LockProtocol,
    store::StoreHandle,
};

/// Submission guard and execution wrapper for deduplicated jobs.
///
/// Cheap to clone.
#[derive(Clone)]
pub struct LockHooks {
    protocol: LockProtocol,
    identity: IdentityHandle,
}

impl LockHooks {
    /// Create hooks from a protocol and an identity strategy.
    pub fn new(protocol: LockProtocol, identity: IdentityHandle) -> Self {
        Self { protocol, identity }
    }

    /// Hooks using the default key derivation and unbounded TTL for every job type.
    pub fn with_default_identity(protocol: LockProtocol) -> Self {
        Self::new(protocol, Arc::new(DefaultIdentity::default()))
    }

    /// Hooks configured from a [`LockConfig`]: prefix, sentinel and per job type policies.
    pub fn from_config(store: StoreHandle, cfg: &LockConfig) -> Self {
        let protocol = LockProtocol::new(store).with_sentinel(cfg.sentinel.clone());
        Self::new(protocol, Arc::new(IdentityRegistry::from_config(cfg)))
    }

    /// Replace the metrics backend of the underlying protocol.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.protocol = self.protocol.with_metrics(metrics);
        self
    }

    /// Underlying protocol.
    pub fn protocol(&self) -> &LockProtocol {
        &self.protocol
    }

    /// Identity strategy.
    pub fn identity(&self) -> &IdentityHandle {
        &self.identity
    }

    /// Lock key and TTL for a job invocation.
    pub fn resolve(&self, job_type: &str, args: &JobArgs) -> ResolvedLock {
        self.identity.resolve(job_type, args)
    }

    /// Pre-submission hook.
    ///
    /// Returns `Ok(true)` if the lock was taken and the job should be enqueued,
    /// `Ok(false)` if an identical job is already outstanding and the submission must be dropped.
    /// Store failures are returned unchanged.
    #[instrument(level = "debug", skip_all, fields(job_type = %job_type))]
    pub async fn before_submit(&self, job_type: &str, args: &JobArgs) -> Result<bool, CoreError> {
        let lock = self.resolve(job_type, args);
        let granted = self.protocol.acquire(&lock.key, lock.ttl).await?;

        let outcome = if granted {
            LockOutcome::Granted
        } else {
            debug!(key = %lock.key, "identical job outstanding; submission suppressed");
            LockOutcome::Denied
        };
        self.protocol.metrics().record_acquire(job_type, outcome);
        Ok(granted)
    }

    /// Execution-wrapping hook.
    ///
    /// Runs `body` exactly once, then releases the lock derived from the same `job_type` and `args`.
    /// A panicking body is a failed body: the lock is released first, then the panic is resumed.
    /// If the returned future is dropped before completion (cancellation), the release is
    /// spawned on the current tokio runtime instead.
    ///
    /// Failure priority:
    /// - body failed or panicked: [`ExecuteError::Job`] or the panic, whatever the release outcome
    ///   (a release failure is logged and counted);
    /// - body succeeded, release failed: [`ExecuteError::Release`].
    #[instrument(level = "debug", skip_all, fields(job_type = %job_type))]
    pub async fn around_execute<F, Fut, T, E>(
        &self,
        job_type: &str,
        args: &JobArgs,
        body: F,
    ) -> Result<T, ExecuteError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let lock = self.resolve(job_type, args);
        let mut pending = PendingRelease::arm(self.protocol.clone(), lock.key.clone());

        let outcome = AssertUnwindSafe(async move { body().await })
            .catch_unwind()
            .await;
        let released = self.protocol.release(&lock.key).await;
        pending.disarm();

        let metrics = self.protocol.metrics();
        match released {
            Ok(true) => metrics.record_release(job_type, ReleaseOutcome::Released),
            Ok(false) => {
                debug!(key = %lock.key, "lock record already gone at release (expired or removed)");
                metrics.record_release(job_type, ReleaseOutcome::Missing);
            }
            Err(_) => metrics.record_release(job_type, ReleaseOutcome::Failed),
        }

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(payload) => {
                if let Err(e) = &released {
                    warn!(key = %lock.key, error = %e, "lock release failed after job panic");
                }
                panic::resume_unwind(payload)
            }
        };

        match (outcome, released) {
            (Ok(value), Ok(_)) => Ok(value),
            (Ok(_), Err(e)) => Err(ExecuteError::Release(e)),
            (Err(job), Ok(_)) => Err(ExecuteError::Job(job)),
            (Err(job), Err(e)) => {
                warn!(key = %lock.key, error = %e, "lock release failed after job failure; reporting job failure");
                Err(ExecuteError::Job(job))
            }
        }
    }

    /// Release the lock of a job that was accepted by [`before_submit`](Self::before_submit) but never ran.
    ///
    /// Used by schedulers when enqueueing fails after the lock was taken.
    pub async fn release_job(&self, job_type: &str, args: &JobArgs) -> Result<bool, CoreError> {
        let lock = self.resolve(job_type, args);
        self.protocol.release(&lock.key).await
    }

    /// Returns `true` if the lock of this job invocation is currently held.
    pub async fn is_locked(&self, job_type: &str, args: &JobArgs) -> Result<bool, CoreError> {
        let lock = self.resolve(job_type, args);
        self.protocol.is_locked(&lock.key).await
    }
}
