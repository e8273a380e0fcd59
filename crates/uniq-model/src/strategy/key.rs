use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Defines how a lock key is derived for a job type.
///
/// Strategies:
/// - `PerArgs`: one lock per distinct argument list (`{prefix}{job_type}-{args}`).
/// - `PerType`: one lock per job type, arguments ignored (`{prefix}{job_type}`).
/// - `Fixed`: a named lock (`{prefix}{name}`), which may be shared by several job types.
///
/// `PerType` and `Fixed` widen the lock: two submissions with different arguments conflict.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyStrategy {
    /// Key includes the rendered argument list.
    #[default]
    PerArgs,
    /// Key depends on the job type only.
    PerType,
    /// Constant key.
    Fixed(String),
}

impl FromStr for KeyStrategy {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        let trimmed = s.trim();
        if let Some(name) = trimmed.strip_prefix("fixed:") {
            let name = name.trim();
            if name.is_empty() {
                return Err(ModelError::Invalid("fixed key name is empty".into()));
            }
            return Ok(KeyStrategy::Fixed(name.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "per-args" | "args" | "" => Ok(KeyStrategy::PerArgs),
            "per-type" | "type" => Ok(KeyStrategy::PerType),
            other => Err(ModelError::UnknownKeyStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStrategy::PerArgs => f.write_str("per-args"),
            KeyStrategy::PerType => f.write_str("per-type"),
            KeyStrategy::Fixed(name) => write!(f, "fixed:{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_strategies() {
        assert_eq!("per-args".parse::<KeyStrategy>().unwrap(), KeyStrategy::PerArgs);
        assert_eq!("".parse::<KeyStrategy>().unwrap(), KeyStrategy::PerArgs);
        assert_eq!("TYPE".parse::<KeyStrategy>().unwrap(), KeyStrategy::PerType);
        assert_eq!(
            "fixed:nightly-export".parse::<KeyStrategy>().unwrap(),
            KeyStrategy::Fixed("nightly-export".into())
        );
    }

    #[test]
    fn fixed_name_keeps_its_case() {
        assert_eq!(
            "fixed:Billing".parse::<KeyStrategy>().unwrap(),
            KeyStrategy::Fixed("Billing".into())
        );
    }

    #[test]
    fn rejects_unknown_and_empty_fixed() {
        assert!(matches!(
            "per-host".parse::<KeyStrategy>(),
            Err(ModelError::UnknownKeyStrategy(_))
        ));
        assert!(matches!(
            "fixed:  ".parse::<KeyStrategy>(),
            Err(ModelError::Invalid(_))
        ));
    }

    #[test]
    fn display_is_parseable() {
        for s in [
            KeyStrategy::PerArgs,
            KeyStrategy::PerType,
            KeyStrategy::Fixed("x".into()),
        ] {
            assert_eq!(s.to_string().parse::<KeyStrategy>().unwrap(), s);
        }
    }

    #[test]
    fn serde_external_tagging() {
        assert_eq!(
            serde_json::to_string(&KeyStrategy::PerType).unwrap(),
            r#""perType""#
        );
        let fixed: KeyStrategy = serde_json::from_str(r#"{"fixed":"exports"}"#).unwrap();
        assert_eq!(fixed, KeyStrategy::Fixed("exports".into()));
    }
}
