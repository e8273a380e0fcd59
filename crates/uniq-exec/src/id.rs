use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide sequence for run identifiers.
static RUN_SEQ: AtomicU64 = AtomicU64::new(1);

fn next_seq() -> u64 {
    RUN_SEQ.fetch_add(1, Ordering::Relaxed)
}

/// Build a run id used as the taskvisor task name.
///
/// Format: `{job_type}-{seq:x}`, where `seq` is a per-process hex sequence.
/// Every submission gets its own name, so the supervisor never merges two accepted jobs.
pub fn make_run_id(job_type: &str) -> String {
    format!("{job_type}-{seq:x}", seq = next_seq())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq_of(id: &str) -> u64 {
        let hex = id.rsplit('-').next().unwrap();
        u64::from_str_radix(hex, 16).unwrap()
    }

    #[test]
    fn ids_are_prefixed_and_increasing() {
        let a = make_run_id("report");
        let b = make_run_id("report");

        assert!(a.starts_with("report-"));
        assert_ne!(a, b);
        assert!(seq_of(&b) > seq_of(&a));
    }
}
