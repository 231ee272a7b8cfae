//! IQM Job — per-shot results for circuit runs on IQM servers
//!
//! This crate wraps a run on an IQM server in a host-SDK style [`Job`]:
//! poll it with [`Job::status`], block on it with [`Job::result`], and get
//! back per-shot memory and counts in the layout circuit SDKs use for
//! classical registers.
//!
//! # Overview
//!
//! - [`RunClient`] is the seam to the execution service (`get_run`,
//!   `wait_for_results`)
//! - [`IqmJob`] implements [`Job`] and caches the first successful result
//! - [`format_memory`] rebuilds per-shot bitstrings from per-bit
//!   measurement columns keyed by [`MeasurementKey`]
//! - [`JobOutcome`] / [`Counts`] hold the result
//! - [`JobError`] covers validation, client and unsupported-operation errors
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use iqm_job::{IqmJob, Job, JobMetadata};
//!
//! let client = Arc::new(MyClient::connect(url)?);
//! let mut job = IqmJob::new(run_id, client).with_metadata(JobMetadata::new().with_shots(1000));
//!
//! let outcome = job.result().await?;
//! println!("{:?}", outcome.get_counts());
//! ```
//!
//! # Lifecycle
//!
//! ```text
//!   backend run ──→ IqmJob::new() ──→ status() ... status() ──→ Done
//!                                        └──────── result() ───┘
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod iqm;
pub mod job;
pub mod measurement;
pub mod memory;
pub mod result;

pub use client::{ClientError, ClientResult, Measurements, RunClient, RunResult, RunStatus};
pub use config::JobMetadata;
pub use error::{JobError, JobResult};
pub use iqm::IqmJob;
pub use job::{Job, JobId, JobStatus};
pub use measurement::MeasurementKey;
pub use memory::{RegisterGrid, format_memory};
pub use result::{Counts, ExperimentData, ExperimentResult, JobOutcome};
