//! Job result types.
//!
//! Bitstring ordering: registers are separated by a space, the register with
//! the highest index comes first, and inside a register the rightmost bit is
//! bit 0. For example `"101 10"` means register 1 read `101` and register 0
//! read `10`.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts from circuit execution.
///
/// Maps bitstrings to occurrence counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Map from bitstring to count.
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from per-shot memory.
    pub fn from_memory<S: AsRef<str>>(memory: &[S]) -> Self {
        let mut counts = Self::new();
        for bitstring in memory {
            counts.insert(bitstring.as_ref(), 1);
        }
        counts
    }

    /// Insert a count for a bitstring. Repeated bitstrings accumulate.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_default() += count;
    }

    /// Get the count for a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over (bitstring, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Get the total number of shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Get the most frequent bitstring.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts.iter().max_by_key(|&(_, count)| count)
    }

    /// Get sorted counts (by count descending, then bitstring).
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut items: Vec<_> = self.counts.iter().collect();
        items.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        items
    }

    /// Get the number of unique bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if counts are empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Data of one experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentData {
    /// One bitstring per shot, indexed by shot number.
    pub memory: Vec<String>,
    /// Histogram of `memory`.
    pub counts: Counts,
}

/// Result of one circuit in a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// Number of shots executed.
    pub shots: usize,
    /// Whether the experiment succeeded.
    pub success: bool,
    /// Measurement data.
    pub data: ExperimentData,
}

impl ExperimentResult {
    /// Create a successful experiment result from per-shot memory.
    pub fn from_memory(memory: Vec<String>) -> Self {
        let counts = Counts::from_memory(&memory);
        Self {
            shots: memory.len(),
            success: true,
            data: ExperimentData { memory, counts },
        }
    }
}

/// Full result of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOutcome {
    /// Backend name. Not tracked by the job.
    pub backend_name: Option<String>,
    /// Backend version. Not tracked by the job.
    pub backend_version: Option<String>,
    /// Payload id. Not tracked by the job.
    pub qobj_id: Option<String>,
    /// Job identifier.
    pub job_id: String,
    /// Whether the job succeeded.
    pub success: bool,
    /// One entry per circuit.
    pub results: Vec<ExperimentResult>,
    /// Local calendar date on which the result was first fetched.
    pub date: NaiveDate,
}

impl JobOutcome {
    /// Get the counts of the first experiment.
    pub fn get_counts(&self) -> Option<&Counts> {
        self.results.first().map(|r| &r.data.counts)
    }

    /// Get the per-shot memory of the first experiment.
    pub fn get_memory(&self) -> Option<&[String]> {
        self.results.first().map(|r| r.data.memory.as_slice())
    }
}
