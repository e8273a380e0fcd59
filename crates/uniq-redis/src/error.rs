use thiserror::Error;
use uniq_core::StoreError;

#[derive(Debug, Error)]
pub enum RedisStoreError {
    #[error("invalid redis url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Classify a redis failure for the lock protocol.
///
/// Connection-level failures become [`StoreError::Unavailable`]; everything else is a protocol error.
pub(crate) fn to_store_error(e: redis::RedisError) -> StoreError {
    let connection_level = matches!(e.kind(), redis::ErrorKind::IoError)
        || e.is_io_error()
        || e.is_connection_dropped()
        || e.is_connection_refusal()
        || e.is_timeout();

    if connection_level {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Protocol(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::{ErrorKind, RedisError};

    #[test]
    fn io_errors_are_unavailable() {
        let err = RedisError::from((ErrorKind::IoError, "broken pipe"));
        assert!(matches!(to_store_error(err), StoreError::Unavailable(_)));
    }

    #[test]
    fn type_errors_are_protocol_errors() {
        let err = RedisError::from((ErrorKind::TypeError, "unexpected reply"));
        assert!(matches!(to_store_error(err), StoreError::Protocol(_)));
    }
}
