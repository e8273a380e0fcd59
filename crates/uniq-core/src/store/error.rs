use thiserror::Error;

/// Failure reported by a lock store.
///
/// Denial (key already present) is never an error; it is the `false` result of `set_if_absent`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store protocol error: {0}")]
    Protocol(String),

    #[error("store internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Return label value for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "unavailable",
            StoreError::Protocol(_) => "protocol",
            StoreError::Internal(_) => "internal",
        }
    }
}
