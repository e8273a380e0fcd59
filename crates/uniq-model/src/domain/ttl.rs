use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    domain::{MAX_LOCK_TTL_SECS, TtlSecs},
    error::{ModelError, ModelResult},
};

/// Self-expiry of a held lock.
///
/// - `Unbounded`: the record lives until it is released (default).
/// - `Seconds(n)`: the store drops the record `n` seconds after acquisition, even if it was never released.
///
/// A finite TTL is the only recovery path from a holder that crashed before releasing.
/// `Seconds(0)` is accepted and yields a record that expires immediately.
/// Values above [`MAX_LOCK_TTL_SECS`] are clamped to it when turned into a duration.
///
/// Serialized as `null` (unbounded) or an integer number of seconds.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<TtlSecs>", into = "Option<TtlSecs>")]
pub enum LockTtl {
    /// No expiry.
    #[default]
    Unbounded,
    /// Expire after the given number of seconds.
    Seconds(TtlSecs),
}

impl LockTtl {
    /// Finite TTL of `secs` seconds.
    pub const fn seconds(secs: TtlSecs) -> Self {
        Self::Seconds(secs)
    }

    /// Returns `true` if the lock never expires on its own.
    pub const fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Expiry as a [`Duration`], `None` when unbounded. Clamped to [`MAX_LOCK_TTL_SECS`].
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Unbounded => None,
            Self::Seconds(secs) => Some(Duration::from_secs((*secs).min(MAX_LOCK_TTL_SECS))),
        }
    }

    /// Returns `true` if the TTL is finite and above [`MAX_LOCK_TTL_SECS`].
    pub const fn exceeds_max(&self) -> bool {
        matches!(self, Self::Seconds(secs) if *secs > MAX_LOCK_TTL_SECS)
    }
}

impl From<Option<TtlSecs>> for LockTtl {
    fn from(v: Option<TtlSecs>) -> Self {
        match v {
            Some(secs) => Self::Seconds(secs),
            None => Self::Unbounded,
        }
    }
}

impl From<LockTtl> for Option<TtlSecs> {
    fn from(ttl: LockTtl) -> Self {
        match ttl {
            LockTtl::Unbounded => None,
            LockTtl::Seconds(secs) => Some(secs),
        }
    }
}

impl FromStr for LockTtl {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "unbounded" | "none" | "never" => Ok(Self::Unbounded),
            other => other
                .trim_end_matches('s')
                .parse::<TtlSecs>()
                .map(Self::Seconds)
                .map_err(|_| ModelError::InvalidTtl(s.to_string())),
        }
    }
}

impl fmt::Display for LockTtl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("unbounded"),
            Self::Seconds(secs) => write!(f, "{secs}s"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded() {
        assert_eq!(LockTtl::default(), LockTtl::Unbounded);
        assert!(LockTtl::default().as_duration().is_none());
    }

    #[test]
    fn parses_unbounded_aliases() {
        for input in ["", "unbounded", "NONE", " never "] {
            assert_eq!(input.parse::<LockTtl>().unwrap(), LockTtl::Unbounded);
        }
    }

    #[test]
    fn parses_seconds_with_optional_suffix() {
        assert_eq!("5".parse::<LockTtl>().unwrap(), LockTtl::Seconds(5));
        assert_eq!("30s".parse::<LockTtl>().unwrap(), LockTtl::Seconds(30));
        assert_eq!("0".parse::<LockTtl>().unwrap(), LockTtl::Seconds(0));
    }

    #[test]
    fn rejects_negative_and_garbage() {
        for input in ["-1", "five", "1.5", "5m"] {
            assert!(
                input.parse::<LockTtl>().is_err(),
                "expected error for {input:?}"
            );
        }
    }

    #[test]
    fn huge_ttls_are_clamped() {
        let max = Duration::from_secs(MAX_LOCK_TTL_SECS);

        assert_eq!(LockTtl::Seconds(u64::MAX).as_duration(), Some(max));
        assert_eq!(LockTtl::Seconds(MAX_LOCK_TTL_SECS).as_duration(), Some(max));
        assert!(LockTtl::Seconds(u64::MAX).exceeds_max());
        assert!(!LockTtl::Seconds(MAX_LOCK_TTL_SECS).exceeds_max());
        assert!(!LockTtl::Unbounded.exceeds_max());
    }

    #[test]
    fn display_is_parseable() {
        for ttl in [LockTtl::Unbounded, LockTtl::Seconds(42)] {
            assert_eq!(ttl.to_string().parse::<LockTtl>().unwrap(), ttl);
        }
    }

    #[test]
    fn serde_uses_null_for_unbounded() {
        assert_eq!(serde_json::to_string(&LockTtl::Unbounded).unwrap(), "null");
        assert_eq!(serde_json::to_string(&LockTtl::Seconds(5)).unwrap(), "5");

        let ttl: LockTtl = serde_json::from_str("10").unwrap();
        assert_eq!(ttl.as_duration(), Some(Duration::from_secs(10)));
    }
}
