use thiserror::Error;

use crate::store::{StoreError, StoreOp};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("lock store {op} failed for key '{key}': {source}")]
    Store {
        op: StoreOp,
        key: String,
        #[source]
        source: StoreError,
    },
}

impl CoreError {
    /// Store operation that failed.
    pub fn op(&self) -> StoreOp {
        match self {
            CoreError::Store { op, .. } => *op,
        }
    }

    /// Underlying store failure.
    pub fn store_error(&self) -> &StoreError {
        match self {
            CoreError::Store { source, .. } => source,
        }
    }
}

/// Failure of a job run through [`LockHooks::around_execute`](crate::hooks::LockHooks::around_execute).
///
/// A job failure always takes priority: if both the job body and the lock release fail,
/// `Job` is returned and the release failure is only logged and counted.
#[derive(Debug, Error)]
pub enum ExecuteError<E> {
    /// The job body failed; the error is passed through unchanged.
    #[error("job failed: {0}")]
    Job(E),

    /// The job body succeeded but the lock could not be released.
    #[error("lock release failed: {0}")]
    Release(#[source] CoreError),
}

impl<E> ExecuteError<E> {
    /// Returns the job body error, if that is what failed.
    pub fn into_job_error(self) -> Option<E> {
        match self {
            ExecuteError::Job(e) => Some(e),
            ExecuteError::Release(_) => None,
        }
    }

    /// Returns `true` if the lock release failed after a successful job.
    pub fn is_release(&self) -> bool {
        matches!(self, ExecuteError::Release(_))
    }
}
