//! IQM job implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use tracing::{debug, info, instrument};

use crate::client::{RunClient, RunResult, RunStatus};
use crate::config::JobMetadata;
use crate::error::{JobError, JobResult};
use crate::job::{Job, JobId, JobStatus};
use crate::memory::format_memory;
use crate::result::{ExperimentResult, JobOutcome};

/// A circuit run on an IQM server, seen through the [`Job`] interface.
///
/// The result is fetched at most once. After the first successful fetch,
/// from either [`Job::status`] or [`Job::result`], the job is `Done` and
/// answers from its cache.
pub struct IqmJob<C> {
    /// Job identifier assigned by the server.
    job_id: JobId,
    /// Client shared with the backend that created the job.
    client: Arc<C>,
    /// Metadata recorded at submission.
    metadata: JobMetadata,
    /// Result, once fetched.
    cached: Option<JobOutcome>,
}

impl<C: RunClient> IqmJob<C> {
    /// Create a job for a run the backend has already submitted.
    pub fn new(job_id: impl Into<JobId>, client: Arc<C>) -> Self {
        Self {
            job_id: job_id.into(),
            client,
            metadata: JobMetadata::default(),
            cached: None,
        }
    }

    /// Set the job metadata.
    pub fn with_metadata(mut self, metadata: JobMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Get the job metadata.
    pub fn metadata(&self) -> &JobMetadata {
        &self.metadata
    }

    /// Check if the result has been fetched.
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Turn a finished run record into the job outcome.
    fn build_outcome(&self, run: &RunResult) -> JobResult<JobOutcome> {
        match run.status {
            RunStatus::Failed => {
                return Err(JobError::RunFailed {
                    id: self.job_id.0.clone(),
                    message: run.message.clone().unwrap_or_default(),
                });
            }
            RunStatus::Unknown => {
                return Err(JobError::RunFailed {
                    id: self.job_id.0.clone(),
                    message: run
                        .message
                        .clone()
                        .unwrap_or_else(|| "run ended in an unrecognised status".into()),
                });
            }
            RunStatus::Pending | RunStatus::Ready => {}
        }

        let measurements = run
            .measurements
            .as_ref()
            .ok_or_else(|| JobError::MissingMeasurements(self.job_id.0.clone()))?;
        let memory = format_memory(measurements, self.metadata.shots)?;

        Ok(JobOutcome {
            backend_name: None,
            backend_version: None,
            qobj_id: None,
            job_id: self.job_id.0.clone(),
            success: true,
            results: vec![ExperimentResult::from_memory(memory)],
            date: Local::now().date_naive(),
        })
    }

    /// Store the outcome. The cache is written exactly once.
    fn store(&mut self, outcome: JobOutcome) {
        if self.cached.is_none() {
            info!(
                job_id = %self.job_id,
                shots = outcome.get_memory().map_or(0, <[String]>::len),
                "Cached job result"
            );
            self.cached = Some(outcome);
        }
    }
}

#[async_trait]
impl<C: RunClient> Job for IqmJob<C> {
    fn job_id(&self) -> &JobId {
        &self.job_id
    }

    #[instrument(skip(self), fields(job_id = %self.job_id))]
    async fn status(&mut self) -> JobResult<JobStatus> {
        if self.cached.is_some() {
            return Ok(JobStatus::Done);
        }

        let run = self
            .client
            .get_run(self.job_id.uuid()?)
            .await
            .map_err(JobError::Client)?;

        // Failed runs are indistinguishable from pending ones here.
        if !run.is_ready() {
            debug!(status = ?run.status, "Run not ready");
            return Ok(JobStatus::Running);
        }

        let outcome = self.build_outcome(&run)?;
        self.store(outcome);
        Ok(JobStatus::Done)
    }

    #[instrument(skip(self), fields(job_id = %self.job_id))]
    async fn result(&mut self) -> JobResult<JobOutcome> {
        if let Some(outcome) = &self.cached {
            return Ok(outcome.clone());
        }

        debug!("Waiting for run results");
        let run = self
            .client
            .wait_for_results(self.job_id.uuid()?)
            .await
            .map_err(JobError::Client)?;

        let outcome = self.build_outcome(&run)?;
        self.store(outcome.clone());
        Ok(outcome)
    }

    fn submit(&self) -> JobResult<()> {
        Err(JobError::Unsupported(
            "Instead, use the backend's run method to submit jobs.".into(),
        ))
    }

    fn cancel(&self) -> JobResult<()> {
        Err(JobError::Unsupported(
            "Canceling jobs is currently not supported.".into(),
        ))
    }
}
