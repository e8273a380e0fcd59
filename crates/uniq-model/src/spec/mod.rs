mod job;
pub use job::Job;
