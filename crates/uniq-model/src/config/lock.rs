use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    config::LockPolicy,
    domain::{DEFAULT_LOCK_PREFIX, DEFAULT_LOCK_SENTINEL, JobType, MAX_LOCK_TTL_SECS},
    error::{ModelError, ModelResult},
};

/// Deduplication lock configuration.
///
/// ```json
/// {
///   "prefix": "lock:",
///   "default": { "ttl": 3600 },
///   "jobs": {
///     "Report": { "ttl": 5 },
///     "Reindex": { "key": "perType" }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Prefix prepended to every lock key.
    pub prefix: String,
    /// Value stored in a lock record.
    pub sentinel: String,
    /// Policy for job types without an explicit entry.
    pub default: LockPolicy,
    /// Per job type overrides.
    pub jobs: BTreeMap<JobType, LockPolicy>,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_LOCK_PREFIX.to_string(),
            sentinel: DEFAULT_LOCK_SENTINEL.to_string(),
            default: LockPolicy::default(),
            jobs: BTreeMap::new(),
        }
    }
}

impl LockConfig {
    /// Policy applied to `job_type`.
    pub fn policy_for(&self, job_type: &str) -> &LockPolicy {
        self.jobs.get(job_type).unwrap_or(&self.default)
    }

    /// Register or replace the policy of a job type.
    ///
    /// Returns `self` for chaining.
    pub fn with_job(mut self, job_type: impl Into<JobType>, policy: LockPolicy) -> Self {
        self.jobs.insert(job_type.into(), policy);
        self
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(s: &str) -> ModelResult<Self> {
        let cfg: LockConfig =
            serde_json::from_str(s).map_err(|e| ModelError::Invalid(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate the configuration.
    ///
    /// Rules:
    /// - `sentinel` is not empty (stores reject empty values);
    /// - job type names are not empty or whitespace-only;
    /// - no TTL exceeds [`MAX_LOCK_TTL_SECS`].
    pub fn validate(&self) -> ModelResult<()> {
        if self.sentinel.is_empty() {
            return Err(ModelError::Invalid("lock sentinel is empty".into()));
        }
        if self.jobs.keys().any(|t| t.trim().is_empty()) {
            return Err(ModelError::Invalid("job type name is empty".into()));
        }
        if let Some(policy) = std::iter::once(&self.default)
            .chain(self.jobs.values())
            .find(|p| p.ttl.exceeds_max())
        {
            return Err(ModelError::InvalidTtl(format!(
                "{} exceeds the maximum of {MAX_LOCK_TTL_SECS}s",
                policy.ttl
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyStrategy, LockTtl};

    #[test]
    fn default_values() {
        let cfg = LockConfig::default();
        assert_eq!(cfg.prefix, "lock:");
        assert_eq!(cfg.sentinel, "1");
        assert_eq!(cfg.default, LockPolicy::default());
        assert!(cfg.jobs.is_empty());
    }

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = LockConfig::from_json("{}").unwrap();
        assert_eq!(cfg, LockConfig::default());
    }

    #[test]
    fn parses_per_job_overrides() {
        let cfg = LockConfig::from_json(
            r#"{
                "default": { "ttl": 3600 },
                "jobs": {
                    "Report": { "ttl": 5 },
                    "Reindex": { "key": "perType" },
                    "Export": { "key": { "fixed": "exports" }, "ttl": null }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.policy_for("Report").ttl, LockTtl::Seconds(5));
        assert_eq!(cfg.policy_for("Report").key, KeyStrategy::PerArgs);
        assert_eq!(cfg.policy_for("Reindex").key, KeyStrategy::PerType);
        assert_eq!(cfg.policy_for("Reindex").ttl, LockTtl::Unbounded);
        assert_eq!(
            cfg.policy_for("Export").key,
            KeyStrategy::Fixed("exports".into())
        );
        assert_eq!(cfg.policy_for("Unknown").ttl, LockTtl::Seconds(3600));
    }

    #[test]
    fn rejects_empty_sentinel() {
        let err = LockConfig::from_json(r#"{"sentinel": ""}"#).unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
    }

    #[test]
    fn rejects_blank_job_type() {
        let cfg = LockConfig::default().with_job("  ", LockPolicy::default());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_ttl_above_maximum() {
        let err = LockConfig::from_json(r#"{"jobs": {"Report": {"ttl": 18446744073709551615}}}"#)
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidTtl(_)));

        let cfg = LockConfig::default().with_job(
            "Report",
            LockPolicy::default().with_ttl(LockTtl::Seconds(MAX_LOCK_TTL_SECS)),
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(LockConfig::from_json(r#"{"default": {"ttl": "soon"}}"#).is_err());
    }
}
