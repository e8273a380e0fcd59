//! Supervisor front door that drops duplicate job submissions.
//! - Owns a taskvisor `Supervisor` and runs its loop in background.
//! - Takes the job lock before submitting; denied jobs are never handed to the supervisor.
//! - Gives the lock back when the supervisor refuses an accepted job.
use std::{future::Future, sync::Arc, time::Duration};

use taskvisor::{
    AdmissionPolicy as ControllerAdmission, BackoffPolicy, ControllerConfig, SupervisorConfig,
    ControllerSpec, JitterPolicy, RestartPolicy, Subscribe, Supervisor, TaskError, TaskSpec,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use uniq_core::LockHooks;
use uniq_model::Job;

use crate::{error::ExecError, id::make_run_id, task::unique_task};

/// Result of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// Lock taken and task handed to the supervisor under this run id.
    Scheduled(String),
    /// An identical job is outstanding; nothing was submitted.
    Suppressed,
}

impl Submitted {
    /// Returns `true` if the job was accepted and handed to the supervisor.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled(_))
    }

    /// Run id of a scheduled task.
    pub fn run_id(&self) -> Option<&str> {
        match self {
            Self::Scheduled(id) => Some(id),
            Self::Suppressed => None,
        }
    }
}

/// taskvisor [`Supervisor`] guarded by [`LockHooks`].
pub struct UniqueSupervisor {
    sup: Arc<Supervisor>,
    hooks: Arc<LockHooks>,
}

impl UniqueSupervisor {
    /// Create a supervisor with explicit configs and start its run loop in background.
    pub async fn new(
        sup_cfg: SupervisorConfig,
        ctrl_cfg: ControllerConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
        hooks: LockHooks,
    ) -> Result<Self, ExecError> {
        let sup = Supervisor::builder(sup_cfg)
            .with_subscribers(subscribers)
            .with_controller(ctrl_cfg)
            .build();

        let runner = Arc::clone(&sup);
        tokio::spawn(async move {
            if let Err(e) = runner.run(Vec::new()).await {
                warn!(error = %e, "supervisor run loop exited with error");
            }
        });
        sup.wait_ready().await;
        info!("supervisor is ready to accept jobs");

        Ok(Self {
            sup,
            hooks: Arc::new(hooks),
        })
    }

    /// Get a clone of the underlying supervisor handle.
    pub fn supervisor(&self) -> Arc<Supervisor> {
        Arc::clone(&self.sup)
    }

    /// Lock hooks shared by every submitted task.
    pub fn hooks(&self) -> &LockHooks {
        &self.hooks
    }

    /// Submit a job unless an identical one is outstanding.
    ///
    /// Steps:
    /// 1. Take the job lock; on denial return [`Submitted::Suppressed`].
    /// 2. Wrap `body` into a one-shot task that releases the lock when it ends.
    /// 3. Submit it; if the supervisor refuses, release the lock and return the error.
    ///
    /// `timeout` bounds a single run; an expired run is cancelled and releases the lock.
    #[instrument(level = "debug", skip_all, fields(job_type = %job.job_type))]
    pub async fn submit<B, Fut>(
        &self,
        job: Job,
        timeout: Option<Duration>,
        body: B,
    ) -> Result<Submitted, ExecError>
    where
        B: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        if !self.hooks.before_submit(&job.job_type, &job.args).await? {
            return Ok(Submitted::Suppressed);
        }

        let run_id = make_run_id(&job.job_type);
        let task = unique_task(Arc::clone(&self.hooks), job.clone(), run_id.clone(), body);
        let spec = ControllerSpec {
            admission: ControllerAdmission::Queue,
            task_spec: TaskSpec::new(task, RestartPolicy::Never, one_shot_backoff(), timeout),
        };

        debug!(task = %run_id, "submitting via controller");
        if let Err(e) = self.sup.submit(spec).await {
            if let Err(release) = self.hooks.release_job(&job.job_type, &job.args).await {
                warn!(task = %run_id, error = %release, "failed to release lock of rejected job");
            }
            return Err(ExecError::Supervisor(e.to_string()));
        }
        Ok(Submitted::Scheduled(run_id))
    }
}

/// Backoff for tasks that never restart.
fn one_shot_backoff() -> BackoffPolicy {
    BackoffPolicy {
        first: Duration::ZERO,
        max: Duration::ZERO,
        jitter: JitterPolicy::None,
        factor: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use uniq_core::{LockProtocol, MemoryStore};
    use uniq_model::job_args;

    use super::*;

    async fn wait_unlocked(hooks: &LockHooks, job: &Job) -> bool {
        for _ in 0..200 {
            if !hooks.is_locked(&job.job_type, &job.args).await.unwrap() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[test]
    fn submitted_accessors() {
        let s = Submitted::Scheduled("report-1".into());
        assert!(s.is_scheduled());
        assert_eq!(s.run_id(), Some("report-1"));
        assert!(!Submitted::Suppressed.is_scheduled());
        assert_eq!(Submitted::Suppressed.run_id(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn duplicate_submission_is_suppressed_until_job_finishes() {
        let hooks = LockHooks::with_default_identity(LockProtocol::new(Arc::new(MemoryStore::new())));
        let sup = UniqueSupervisor::new(
            SupervisorConfig::default(),
            ControllerConfig::default(),
            Vec::new(),
            hooks,
        )
        .await
        .unwrap();

        let job = Job::new("report", job_args![1]);
        let runs = Arc::new(AtomicUsize::new(0));
        let gate = CancellationToken::new();

        let body = {
            let runs = Arc::clone(&runs);
            let gate = gate.clone();
            move |_cancel: CancellationToken| {
                let runs = Arc::clone(&runs);
                let gate = gate.clone();
                async move {
                    runs.fetch_add(1, Ordering::SeqCst);
                    gate.cancelled().await;
                    Ok(())
                }
            }
        };

        let first = sup.submit(job.clone(), None, body.clone()).await.unwrap();
        assert!(first.is_scheduled());

        let second = sup.submit(job.clone(), None, body.clone()).await.unwrap();
        assert_eq!(second, Submitted::Suppressed);

        gate.cancel();
        assert!(wait_unlocked(sup.hooks(), &job).await, "lock not released");
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        let third = sup.submit(job.clone(), None, body).await.unwrap();
        assert!(third.is_scheduled());
        assert!(wait_unlocked(sup.hooks(), &job).await, "lock not released");
    }
}
