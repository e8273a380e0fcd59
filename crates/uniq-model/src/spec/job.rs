use serde::{Deserialize, Serialize};

use crate::domain::{JobArgs, JobType};

/// One logical job invocation: a job type plus its ordered arguments.
///
/// This is the input of lock identity: logically identical jobs share a lock key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Job type identifier.
    pub job_type: JobType,
    /// Ordered job arguments.
    #[serde(default)]
    pub args: JobArgs,
}

impl Job {
    /// Create a job invocation.
    pub fn new(job_type: impl Into<JobType>, args: JobArgs) -> Self {
        Self {
            job_type: job_type.into(),
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_args() {
        let job: Job = serde_json::from_str(r#"{"jobType":"Cleanup"}"#).unwrap();
        assert_eq!(job.job_type, "Cleanup");
        assert!(job.args.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let job = Job::new("Report", crate::job_args![1]);
        let json = serde_json::to_string(&job).unwrap();
        assert_eq!(json, r#"{"jobType":"Report","args":[1]}"#);
    }
}
