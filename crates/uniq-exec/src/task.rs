use std::{future::Future, sync::Arc};

use taskvisor::{TaskError, TaskFn, TaskRef};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use uniq_core::{ExecuteError, LockHooks};
use uniq_model::Job;

/// Run one invocation of `job` under its lock.
///
/// The body races the cancellation token; whichever finishes first, the lock is released
/// before this returns. A lock release failure after a successful body fails the task.
pub async fn run_unique<F, Fut>(
    hooks: &LockHooks,
    job: &Job,
    cancel: CancellationToken,
    body: F,
) -> Result<(), TaskError>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = Result<(), TaskError>>,
{
    let result = hooks
        .around_execute(&job.job_type, &job.args, move || async move {
            tokio::select! {
                res = body(cancel.clone()) => res,
                _ = cancel.cancelled() => {
                    debug!("cancellation requested; abandoning job body");
                    Err(TaskError::Canceled)
                }
            }
        })
        .await;

    match result {
        Ok(()) => Ok(()),
        Err(ExecuteError::Job(e)) => Err(e),
        Err(ExecuteError::Release(e)) => Err(TaskError::Fail {
            reason: format!("lock release failed: {e}"),
        }),
    }
}

/// Wrap a job body into a taskvisor task that releases the job's lock on every exit path.
///
/// The lock is expected to be held already (see [`LockHooks::before_submit`]).
/// Each run of the task releases it, so the task must be submitted with `RestartPolicy::Never`.
pub fn unique_task<B, Fut>(
    hooks: Arc<LockHooks>,
    job: Job,
    run_id: impl Into<String>,
    body: B,
) -> TaskRef
where
    B: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    let run_id = run_id.into();
    let body = Arc::new(body);

    trace!(task = %run_id, job_type = %job.job_type, "building unique task");
    TaskFn::arc(run_id, move |cancel: CancellationToken| {
        let hooks = Arc::clone(&hooks);
        let job = job.clone();
        let body = Arc::clone(&body);

        async move { run_unique(&hooks, &job, cancel, move |token| body(token)).await }
    })
}
