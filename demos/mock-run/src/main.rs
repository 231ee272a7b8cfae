//! Drive an `IqmJob` against an in-memory run client.
//!
//! The client pretends to run a Bell circuit measured into two registers and
//! reports the run as pending for the first few polls.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use iqm_job::{
    ClientResult, IqmJob, Job, JobMetadata, JobStatus, Measurements, RunClient, RunResult,
};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const SHOTS: usize = 8;

/// Run client that becomes ready after a fixed number of polls.
struct MockClient {
    polls_left: AtomicU32,
}

impl MockClient {
    fn new(pending_polls: u32) -> Self {
        Self {
            polls_left: AtomicU32::new(pending_polls),
        }
    }

    /// Bell pairs: register `c0` holds qubit 0, register `c1` holds qubit 1.
    fn measurements() -> Measurements {
        let outcomes: Vec<Vec<u8>> = (0..SHOTS).map(|s| vec![u8::from(s % 3 == 0)]).collect();
        let mut measurements = Measurements::default();
        measurements.insert("c0_1_0_0".into(), outcomes.clone());
        measurements.insert("c1_1_1_0".into(), outcomes);
        measurements
    }
}

#[async_trait]
impl RunClient for MockClient {
    async fn get_run(&self, _job_id: Uuid) -> ClientResult<RunResult> {
        let left = self.polls_left.load(Ordering::SeqCst);
        if left > 0 {
            self.polls_left.store(left - 1, Ordering::SeqCst);
            return Ok(RunResult::pending());
        }
        Ok(RunResult::ready(Self::measurements()))
    }

    async fn wait_for_results(&self, _job_id: Uuid) -> ClientResult<RunResult> {
        Ok(RunResult::ready(Self::measurements()))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Arc::new(MockClient::new(2));
    let mut job = IqmJob::new(Uuid::new_v4(), Arc::clone(&client))
        .with_metadata(JobMetadata::new().with_shots(SHOTS));

    println!("Job ID: {}", job.job_id());

    if let Err(e) = job.cancel() {
        println!("Cancel: {e}");
    }

    // Poll
    loop {
        let status = job.status().await?;
        println!("Status: {status}");
        if status == JobStatus::Done {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let outcome = job.result().await?;
    println!("Date:   {}", outcome.date);
    println!();

    println!("Memory:");
    for (shot, bits) in outcome.get_memory().unwrap_or_default().iter().enumerate() {
        println!("  {shot:>2}: {bits}");
    }

    println!("\nCounts:");
    if let Some(counts) = outcome.get_counts() {
        for (bitstring, count) in counts.sorted() {
            println!("  {bitstring}: {count}");
        }
    }

    Ok(())
}
