use std::{sync::Arc, time::Duration};

use tracing::info;

use taskvisor::{ControllerConfig, SupervisorConfig, TaskError};
use uniq_core::{LockHooks, MemoryStore, StoreHandle};
use uniq_exec::{Submitted, UniqueSupervisor};
use uniq_model::{Job, LockConfig, job_args};
use uniq_observe::{LoggerConfig, LoggerLevel, init_logger};
use uniq_prometheus::{PrometheusMetrics, TextEncoder};
use uniq_redis::RedisStore;

/// Lock policies: reports dedupe per arguments with a crash TTL,
/// reindex runs one at a time whatever its arguments.
const LOCKS: &str = r#"{
    "prefix": "lock:",
    "jobs": {
        "report": { "ttl": 30 },
        "reindex": { "key": { "fixed": "reindex" } }
    }
}"#;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) logger
    let cfg = LoggerConfig {
        level: LoggerLevel::new("uniq_core=debug,info")?,
        ..Default::default()
    };
    init_logger(&cfg)?;
    info!("logger initialized");

    // 2) store: redis when UNIQ_REDIS_URL is set, in-memory otherwise
    let store: StoreHandle = match std::env::var("UNIQ_REDIS_URL") {
        Ok(url) => {
            info!(%url, "using redis lock store");
            Arc::new(RedisStore::open(&url)?)
        }
        Err(_) => Arc::new(MemoryStore::new()),
    };

    // 3) hooks + metrics
    let metrics = PrometheusMetrics::new()?;
    let hooks = LockHooks::from_config(store, &LockConfig::from_json(LOCKS)?)
        .with_metrics(Arc::new(metrics.clone()));

    // 4) supervisor
    let sup = UniqueSupervisor::new(
        SupervisorConfig::default(),
        ControllerConfig::default(),
        Vec::new(),
        hooks,
    )
    .await?;

    // 5) submissions: the duplicates are dropped while the first run is outstanding
    let jobs = [
        Job::new("report", job_args![1]),
        Job::new("report", job_args![1]),
        Job::new("report", job_args![2]),
        Job::new("reindex", job_args!["users"]),
        Job::new("reindex", job_args!["orders"]),
    ];
    for job in jobs {
        let label = format!("{}{}", job.job_type, job.args);
        let outcome = sup
            .submit(job, Some(Duration::from_secs(5)), move |_cancel| {
                let label = label.clone();
                async move {
                    info!(job = %label, "working");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    Ok::<(), TaskError>(())
                }
            })
            .await?;

        match outcome {
            Submitted::Scheduled(run_id) => info!(task = %run_id, "scheduled"),
            Submitted::Suppressed => info!("identical job outstanding; dropped"),
        }
    }

    tokio::time::sleep(Duration::from_secs(3)).await;

    // 6) once every run is over, the same job is accepted again
    let again = sup
        .submit(Job::new("report", job_args![1]), None, |_cancel| async {
            Ok::<(), TaskError>(())
        })
        .await?;
    info!(scheduled = again.is_scheduled(), "resubmitted report[1]");

    tokio::time::sleep(Duration::from_millis(500)).await;
    println!("{}", TextEncoder::new().encode_to_string(&metrics.gather())?);
    Ok(())
}
