use std::fmt;

use serde::{Deserialize, Serialize};

/// A single job argument.
///
/// Arguments are JSON values so that their type survives rendering: `1` and `"1"` are different arguments.
pub type JobArg = serde_json::Value;

/// Ordered argument list of a job invocation.
///
/// Order and types are significant; no normalization is applied.
/// The canonical rendering (see [`fmt::Display`]) is the compact JSON array, e.g. `[1,"a",true]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobArgs(Vec<JobArg>);

impl JobArgs {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an argument.
    ///
    /// Returns `self` for chaining.
    pub fn push(&mut self, arg: impl Into<JobArg>) -> &mut Self {
        self.0.push(arg.into());
        self
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the job takes no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Argument at `idx`, if present.
    pub fn get(&self, idx: usize) -> Option<&JobArg> {
        self.0.get(idx)
    }

    /// Iterate over the arguments in order.
    pub fn iter(&self) -> impl Iterator<Item = &JobArg> {
        self.0.iter()
    }

    /// Canonical string rendering used for lock keys.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for JobArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, arg) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str("]")
    }
}

impl From<Vec<JobArg>> for JobArgs {
    fn from(args: Vec<JobArg>) -> Self {
        Self(args)
    }
}

impl FromIterator<JobArg> for JobArgs {
    fn from_iter<I: IntoIterator<Item = JobArg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build [`JobArgs`] from a list of expressions convertible into [`JobArg`].
///
/// ```
/// use uniq_model::job_args;
///
/// let args = job_args![1, "a", true];
/// assert_eq!(args.render(), r#"[1,"a",true]"#);
/// ```
#[macro_export]
macro_rules! job_args {
    () => {
        $crate::JobArgs::new()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::JobArgs::from(vec![$($crate::JobArg::from($arg)),+])
    };
}
