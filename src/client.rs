//! Run client seam.
//!
//! The execution service itself lives outside this crate. A job only needs two
//! calls from it: a non-blocking lookup of the current run record, and a call
//! that resolves once the run is finished. Anything that can answer those two
//! calls implements [`RunClient`].

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error type returned by client implementations.
///
/// Kept opaque so transport and timeout errors reach the caller unchanged.
pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for client calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Raw measurement data of one run.
///
/// Maps a measurement key string to the per-shot values of one classical bit.
/// Every shot is a one-element list, so a well-formed entry has shape
/// `(shots, 1)`.
pub type Measurements = FxHashMap<String, Vec<Vec<u8>>>;

/// Status of a run on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Queued or executing.
    Pending,
    /// Finished, measurements available.
    Ready,
    /// Execution failed.
    Failed,
    /// Any status this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// Run record returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Current status of the run.
    pub status: RunStatus,
    /// Measurement data, present once the run is ready.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Measurements>,
    /// Server message, typically set for failed runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RunResult {
    /// A finished run with the given measurements.
    pub fn ready(measurements: Measurements) -> Self {
        Self {
            status: RunStatus::Ready,
            measurements: Some(measurements),
            message: None,
        }
    }

    /// A run that has not finished yet.
    pub fn pending() -> Self {
        Self {
            status: RunStatus::Pending,
            measurements: None,
            message: None,
        }
    }

    /// A run that failed with a server message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Failed,
            measurements: None,
            message: Some(message.into()),
        }
    }

    /// Check if the run is ready.
    pub fn is_ready(&self) -> bool {
        self.status == RunStatus::Ready
    }
}

/// Client for the circuit execution service.
#[async_trait]
pub trait RunClient: Send + Sync {
    /// Fetch the current record of a run without waiting.
    async fn get_run(&self, job_id: Uuid) -> ClientResult<RunResult>;

    /// Wait until the run is finished and return its record.
    ///
    /// Any timeout is the client's own; callers do not add one.
    async fn wait_for_results(&self, job_id: Uuid) -> ClientResult<RunResult>;
}
