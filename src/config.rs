//! Per-job metadata.

use serde::{Deserialize, Serialize};

/// Metadata attached to a job when the backend creates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobMetadata {
    /// Number of shots the run was submitted with.
    ///
    /// When unset, the shot count is inferred from the measurement data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<usize>,
    /// Free-form metadata carried along with the job.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JobMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shot count.
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = Some(shots);
        self
    }

    /// Add a free-form entry.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let metadata = JobMetadata::new()
            .with_shots(1000)
            .with_extra("circuit", serde_json::json!("bell"));

        assert_eq!(metadata.shots, Some(1000));
        assert_eq!(metadata.extra["circuit"], "bell");
    }

    #[test]
    fn test_from_json() {
        let metadata: JobMetadata = serde_json::from_str(r#"{"shots": 42}"#).unwrap();
        assert_eq!(metadata.shots, Some(42));
        assert!(metadata.extra.is_empty());

        let empty: JobMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, JobMetadata::default());
    }
}
