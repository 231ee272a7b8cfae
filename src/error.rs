//! Job error types.
//!
//! Errors are grouped by where they come from:
//!
//! | Category | Variants | Recovery |
//! |----------|----------|----------|
//! | **Validation** | `ShapeMismatch`, `MalformedKey`, `InconsistentRegister`, `RegisterTooLarge`, `InvalidBit`, `MissingMeasurements` | None, the run data is unusable |
//! | **Run** | `RunFailed` | Resubmit through the backend |
//! | **Input** | `InvalidJobId` | Fix the job id |
//! | **Unsupported** | `Unsupported` | Use the backend instead |
//! | **Client** | `Client` | Whatever the client allows |

use thiserror::Error;

use crate::client::ClientError;

/// Errors that can occur while tracking a job or formatting its result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JobError {
    // ── Validation errors ────────────────────────────────────────────
    /// A measurement column does not have one value per shot.
    #[error(
        "Measurement result {key} has the wrong shape ({}, {}), expected ({}, {})",
        .actual.0, .actual.1, .expected.0, .expected.1
    )]
    ShapeMismatch {
        /// Key of the offending measurement.
        key: String,
        /// Shape found, as `(rows, columns)`.
        actual: (usize, usize),
        /// Shape required, as `(shots, 1)`.
        expected: (usize, usize),
    },

    /// A measurement key string could not be decoded.
    #[error("Malformed measurement key: {0}")]
    MalformedKey(String),

    /// Two measurement keys disagree on the width of one register.
    #[error("Register {creg_idx} has width {expected}, but a measurement claims width {found}")]
    InconsistentRegister {
        /// Index of the register.
        creg_idx: usize,
        /// Width seen first.
        expected: usize,
        /// Conflicting width.
        found: usize,
    },

    /// A register is too wide to hold every shot.
    #[error("Measurement result {key} needs a {shots} × {width} register, which cannot be allocated")]
    RegisterTooLarge {
        /// Key of the offending measurement.
        key: String,
        /// Number of shots.
        shots: usize,
        /// Register width claimed by the key.
        width: usize,
    },

    /// A measured value is not a single bit.
    #[error("Measurement result {key} contains non-binary value {value}")]
    InvalidBit {
        /// Key of the offending measurement.
        key: String,
        /// Value found.
        value: u8,
    },

    /// The run finished without measurement data.
    #[error("Run {0} has no measurements")]
    MissingMeasurements(String),

    // ── Run errors ───────────────────────────────────────────────────
    /// The server reported the run as failed.
    #[error("Run {id} failed: {message}")]
    RunFailed {
        /// Job identifier.
        id: String,
        /// Server message.
        message: String,
    },

    // ── Input errors ─────────────────────────────────────────────────
    /// The job id is not a UUID.
    #[error("Invalid job id {id}: {source}")]
    InvalidJobId {
        /// The job id as given.
        id: String,
        /// Parse failure.
        #[source]
        source: uuid::Error,
    },

    /// Operation not available for this job type.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    // ── Client errors ────────────────────────────────────────────────
    /// Error raised by the run client, passed through unchanged.
    #[error(transparent)]
    Client(ClientError),
}

impl JobError {
    /// Returns `true` if the run data itself was rejected.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. }
                | Self::MalformedKey(_)
                | Self::InconsistentRegister { .. }
                | Self::RegisterTooLarge { .. }
                | Self::InvalidBit { .. }
                | Self::MissingMeasurements(_)
        )
    }
}

/// Result type for job operations.
pub type JobResult<T> = Result<T, JobError>;
