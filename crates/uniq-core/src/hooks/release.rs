use tokio::runtime::Handle;
use tracing::{debug, warn};
use uniq_model::LockKey;

use crate::protocol::LockProtocol;

/// Releases a lock when dropped while still armed.
///
/// Armed for the duration of a job body; disarmed once the regular release has run.
/// Dropping it armed means the surrounding future was cancelled before the body finished.
pub(super) struct PendingRelease {
    protocol: LockProtocol,
    key: Option<LockKey>,
}

impl PendingRelease {
    pub(super) fn arm(protocol: LockProtocol, key: LockKey) -> Self {
        Self {
            protocol,
            key: Some(key),
        }
    }

    pub(super) fn disarm(&mut self) {
        self.key = None;
    }
}

impl Drop for PendingRelease {
    fn drop(&mut self) {
        let Some(key) = self.key.take() else {
            return;
        };

        match Handle::try_current() {
            Ok(handle) => {
                debug!(key = %key, "job interrupted; releasing lock in background");
                let protocol = self.protocol.clone();
                handle.spawn(async move {
                    if let Err(e) = protocol.release(&key).await {
                        warn!(key = %key, error = %e, "background lock release failed");
                    }
                });
            }
            Err(_) => {
                warn!(key = %key, "job interrupted outside of a runtime; lock left to expire");
            }
        }
    }
}
