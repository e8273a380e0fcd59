//! taskvisor integration for deduplicated jobs.
//!
//! - [`unique_task`] turns a job body into a taskvisor [`TaskRef`](taskvisor::TaskRef)
//!   that releases the job's lock when it finishes, fails or is cancelled.
//! - [`UniqueSupervisor`] takes the lock before submitting and drops duplicate submissions.
mod error;
pub use error::ExecError;

mod id;
pub use id::make_run_id;

mod task;
pub use task::{run_unique, unique_task};

mod supervisor;
pub use supervisor::{Submitted, UniqueSupervisor};
