use thiserror::Error;
use uniq_core::CoreError;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error(transparent)]
    Lock(#[from] CoreError),

    #[error("supervisor rejected task: {0}")]
    Supervisor(String),
}
