use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid lock ttl: {0} (expected seconds or 'unbounded')")]
    InvalidTtl(String),

    #[error("unknown key strategy: {0}")]
    UnknownKeyStrategy(String),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
