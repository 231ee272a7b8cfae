//! Job lifecycle types.
//!
//! The job state machine:
//!
//! ```text
//!   Running ──→ Done
//! ```
//!
//! **Invariants:**
//! - A job is `Running` until its result has been fetched and cached.
//! - `Done` is terminal; once reached, no further remote calls are made.
//! - Jobs are created by the backend at run time. `submit()` and `cancel()`
//!   on the job itself always fail.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{JobError, JobResult};
use crate::result::JobOutcome;

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse the ID as the UUID the server assigned.
    pub fn uuid(&self) -> JobResult<Uuid> {
        Uuid::parse_str(&self.0).map_err(|source| JobError::InvalidJobId {
            id: self.0.clone(),
            source,
        })
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<Uuid> for JobId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Result not available yet.
    Running,
    /// Result fetched and cached.
    Done,
}

impl JobStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Done => write!(f, "Done"),
        }
    }
}

/// Job interface of the host SDK.
///
/// Methods that may fill the result cache take `&mut self`; a job shared
/// between tasks must be wrapped by the caller.
#[async_trait]
pub trait Job: Send {
    /// Get the ID of this job.
    fn job_id(&self) -> &JobId;

    /// Get the current status, polling the server at most once.
    async fn status(&mut self) -> JobResult<JobStatus>;

    /// Wait for the job to finish and return its result.
    async fn result(&mut self) -> JobResult<JobOutcome>;

    /// Submit the job. Always fails; jobs are submitted by the backend.
    fn submit(&self) -> JobResult<()>;

    /// Cancel the job. Always fails.
    fn cancel(&self) -> JobResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_terminal() {
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Done.is_terminal());
    }

    #[test]
    fn test_job_status_display() {
        assert_eq!(JobStatus::Running.to_string(), "Running");
        assert_eq!(JobStatus::Done.to_string(), "Done");
    }

    #[test]
    fn test_job_id_from() {
        let id: JobId = "job-123".into();
        assert_eq!(id.0, "job-123");
        assert_eq!(id.to_string(), "job-123");
    }

    #[test]
    fn test_job_id_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(JobId::from(uuid).uuid().unwrap(), uuid);

        let err = JobId::new("job-123").uuid().unwrap_err();
        assert!(matches!(err, JobError::InvalidJobId { ref id, .. } if id == "job-123"));
    }
}
