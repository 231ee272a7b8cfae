//! Measurement keys.
//!
//! Every measured classical bit is reported under a key of the form
//! `{creg_name}_{creg_len}_{creg_idx}_{clbit_idx}`. The register name may
//! contain underscores itself, so the three numeric fields are split off
//! from the right.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JobError;

/// Identifies the slot of one classical bit in the circuit's registers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeasurementKey {
    /// Name of the classical register.
    pub creg_name: String,
    /// Number of bits in the register.
    pub creg_len: usize,
    /// Position of the register in the order registers were added to the circuit.
    pub creg_idx: usize,
    /// Position of the bit inside the register.
    pub clbit_idx: usize,
}

impl MeasurementKey {
    /// Create a key, checking that the bit lies inside the register.
    pub fn new(
        creg_name: impl Into<String>,
        creg_len: usize,
        creg_idx: usize,
        clbit_idx: usize,
    ) -> Result<Self, JobError> {
        let creg_name = creg_name.into();
        if clbit_idx >= creg_len {
            return Err(JobError::MalformedKey(format!(
                "bit {clbit_idx} is outside register {creg_name} of width {creg_len}"
            )));
        }
        Ok(Self {
            creg_name,
            creg_len,
            creg_idx,
            clbit_idx,
        })
    }
}

impl FromStr for MeasurementKey {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || JobError::MalformedKey(s.to_string());

        let mut fields = s.rsplitn(4, '_');
        let mut number = || -> Result<usize, JobError> {
            let field = fields.next().ok_or_else(malformed)?;
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            field.parse().map_err(|_| malformed())
        };

        let clbit_idx = number()?;
        let creg_idx = number()?;
        let creg_len = number()?;
        let creg_name = fields.next().ok_or_else(malformed)?;

        Self::new(creg_name, creg_len, creg_idx, clbit_idx)
    }
}

impl fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.creg_name, self.creg_len, self.creg_idx, self.clbit_idx
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        let key: MeasurementKey = "c_3_1_2".parse().unwrap();
        assert_eq!(key.creg_name, "c");
        assert_eq!(key.creg_len, 3);
        assert_eq!(key.creg_idx, 1);
        assert_eq!(key.clbit_idx, 2);
    }

    #[test]
    fn test_parse_name_with_underscores() {
        let key: MeasurementKey = "my_creg_2_0_1".parse().unwrap();
        assert_eq!(key.creg_name, "my_creg");
        assert_eq!(key.to_string(), "my_creg_2_0_1");
    }

    #[test]
    fn test_parse_empty_name() {
        let key: MeasurementKey = "_1_0_0".parse().unwrap();
        assert_eq!(key.creg_name, "");
        assert_eq!(key.creg_len, 1);
    }

    #[test]
    fn test_malformed_keys() {
        for bad in ["", "c", "c_1_0", "1_0_0", "c_x_0_0", "c_2_0_-1", "c_2_0_ 1"] {
            assert!(
                matches!(bad.parse::<MeasurementKey>(), Err(JobError::MalformedKey(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_bit_outside_register() {
        let err = "c_2_0_2".parse::<MeasurementKey>().unwrap_err();
        assert!(matches!(err, JobError::MalformedKey(_)));
    }
}
