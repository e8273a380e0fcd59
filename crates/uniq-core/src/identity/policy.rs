use uniq_model::{DEFAULT_LOCK_PREFIX, JobArgs, KeyStrategy, LockKey, LockPolicy, LockTtl};

use crate::identity::{LockIdentity, default_lock_key};

/// Identity driven by a declarative [`LockPolicy`].
#[derive(Debug, Clone)]
pub struct PolicyIdentity {
    prefix: String,
    policy: LockPolicy,
}

impl PolicyIdentity {
    /// Identity with the standard `lock:` prefix.
    pub fn new(policy: LockPolicy) -> Self {
        Self::with_prefix(DEFAULT_LOCK_PREFIX, policy)
    }

    /// Identity with a custom key prefix.
    pub fn with_prefix(prefix: impl Into<String>, policy: LockPolicy) -> Self {
        Self {
            prefix: prefix.into(),
            policy,
        }
    }

    /// Underlying policy.
    pub fn policy(&self) -> &LockPolicy {
        &self.policy
    }
}

impl LockIdentity for PolicyIdentity {
    fn lock_key(&self, job_type: &str, args: &JobArgs) -> LockKey {
        match &self.policy.key {
            KeyStrategy::PerArgs => default_lock_key(&self.prefix, job_type, args),
            KeyStrategy::PerType => LockKey::new(format!("{}{job_type}", self.prefix)),
            KeyStrategy::Fixed(name) => LockKey::new(format!("{}{name}", self.prefix)),
        }
    }

    fn lock_ttl(&self, _job_type: &str, _args: &JobArgs) -> LockTtl {
        self.policy.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniq_model::job_args;

    #[test]
    fn per_args_matches_default_derivation() {
        let id = PolicyIdentity::new(LockPolicy::default());
        assert_eq!(id.lock_key("Report", &job_args![1]), "lock:Report-[1]");
        assert_eq!(id.lock_ttl("Report", &job_args![1]), LockTtl::Unbounded);
    }

    #[test]
    fn per_type_ignores_arguments() {
        let id = PolicyIdentity::new(LockPolicy::default().with_key(KeyStrategy::PerType));
        assert_eq!(id.lock_key("Reindex", &job_args![1]), "lock:Reindex");
        assert_eq!(
            id.lock_key("Reindex", &job_args![1]),
            id.lock_key("Reindex", &job_args!["other", 2])
        );
    }

    #[test]
    fn fixed_is_shared_across_job_types() {
        let id = PolicyIdentity::with_prefix(
            "q:",
            LockPolicy::new(KeyStrategy::Fixed("exports".into()), LockTtl::seconds(30)),
        );
        assert_eq!(id.lock_key("CsvExport", &job_args![1]), "q:exports");
        assert_eq!(id.lock_key("PdfExport", &job_args![]), "q:exports");
        assert_eq!(id.lock_ttl("CsvExport", &job_args![]), LockTtl::Seconds(30));
    }
}
