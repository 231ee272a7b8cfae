//! Per-shot memory reassembly.
//!
//! The server reports one column per measured classical bit. The job result
//! wants one bitstring per shot, laid out the way circuit SDKs print
//! classical registers:
//!
//! ```text
//!   shot s:  "<creg n-1> ... <creg 1> <creg 0>"
//!   creg k:  "<bit len-1> ... <bit 1> <bit 0>"
//! ```
//!
//! Registers are ordered by descending register index and separated by a single
//! space. Inside a register the highest bit index is leftmost. Bits that were
//! never measured read as `0`.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::debug;

use crate::client::Measurements;
use crate::error::{JobError, JobResult};
use crate::measurement::MeasurementKey;

/// Bits of one classical register for every shot, row-major `shots × width`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterGrid {
    width: usize,
    bits: Vec<u8>,
}

impl RegisterGrid {
    /// Create a zero-filled grid.
    ///
    /// Returns `None` if `shots × width` bits cannot be allocated.
    pub fn zeros(shots: usize, width: usize) -> Option<Self> {
        let len = shots.checked_mul(width)?;
        let mut bits = Vec::new();
        bits.try_reserve_exact(len).ok()?;
        bits.resize(len, 0);
        Some(Self { width, bits })
    }

    /// Number of bits in the register.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Write one bit per shot into column `clbit_idx`.
    ///
    /// `column` must hold exactly one value per shot.
    fn set_column(&mut self, clbit_idx: usize, column: impl Iterator<Item = u8>) {
        for (row, bit) in column.enumerate() {
            self.bits[row * self.width + clbit_idx] = bit;
        }
    }

    /// Bits of one shot with the most significant (highest index) bit first.
    pub fn row_string(&self, shot: usize) -> String {
        let row = &self.bits[shot * self.width..(shot + 1) * self.width];
        row.iter()
            .rev()
            .map(|&b| if b == 1 { '1' } else { '0' })
            .collect()
    }
}

/// Number of shots to format.
///
/// The recorded count wins. Without one, the row count of an arbitrary
/// measurement is taken as authoritative.
fn resolve_shots(measurements: &Measurements, recorded: Option<usize>) -> usize {
    recorded
        .or_else(|| measurements.values().next().map(Vec::len))
        .unwrap_or(0)
}

/// Group measurement columns into register grids, keyed by register index.
pub fn collect_registers(
    measurements: &Measurements,
    shots: usize,
) -> JobResult<BTreeMap<usize, RegisterGrid>> {
    let expected = (shots, 1);
    let mut registers: BTreeMap<usize, RegisterGrid> = BTreeMap::new();

    for (raw_key, column) in measurements {
        let key: MeasurementKey = raw_key.parse()?;

        let width = column
            .iter()
            .map(Vec::len)
            .find(|&len| len != 1)
            .unwrap_or(1);
        if column.len() != shots || column.iter().any(|row| row.len() != 1) {
            return Err(JobError::ShapeMismatch {
                key: raw_key.clone(),
                actual: (column.len(), width),
                expected,
            });
        }

        if let Some(value) = column.iter().map(|row| row[0]).find(|&v| v > 1) {
            return Err(JobError::InvalidBit {
                key: raw_key.clone(),
                value,
            });
        }

        let grid = match registers.entry(key.creg_idx) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let grid = RegisterGrid::zeros(shots, key.creg_len).ok_or_else(|| {
                    JobError::RegisterTooLarge {
                        key: raw_key.clone(),
                        shots,
                        width: key.creg_len,
                    }
                })?;
                entry.insert(grid)
            }
        };
        if grid.width() != key.creg_len {
            return Err(JobError::InconsistentRegister {
                creg_idx: key.creg_idx,
                expected: grid.width(),
                found: key.creg_len,
            });
        }

        grid.set_column(key.clbit_idx, column.iter().map(|row| row[0]));
    }

    Ok(registers)
}

/// Convert raw measurements into one bitstring per shot.
///
/// `recorded_shots` is the shot count the job was submitted with, if known.
/// Fails without a partial result if any measurement is malformed.
pub fn format_memory(
    measurements: &Measurements,
    recorded_shots: Option<usize>,
) -> JobResult<Vec<String>> {
    let shots = resolve_shots(measurements, recorded_shots);
    let registers = collect_registers(measurements, shots)?;

    debug!(
        shots,
        registers = registers.len(),
        bits = measurements.len(),
        "Formatting measurement results"
    );

    let memory = (0..shots)
        .map(|shot| {
            registers
                .values()
                .rev()
                .map(|grid| grid.row_string(shot))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    Ok(memory)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements(entries: Vec<(&str, Vec<u8>)>) -> Measurements {
        entries
            .into_iter()
            .map(|(key, column)| {
                (
                    key.to_string(),
                    column.into_iter().map(|b| vec![b]).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_register_order_and_bit_order() {
        // creg 1 row = [1, 0, 1], creg 0 row = [0, 1]
        let data = measurements(vec![
            ("c_2_0_0", vec![0]),
            ("c_2_0_1", vec![1]),
            ("d_3_1_0", vec![1]),
            ("d_3_1_1", vec![0]),
            ("d_3_1_2", vec![1]),
        ]);

        let memory = format_memory(&data, Some(1)).unwrap();
        assert_eq!(memory, vec!["101 10"]);
    }

    #[test]
    fn test_bits_reversed_within_register() {
        let data = measurements(vec![("c_3_0_0", vec![1, 0]), ("c_3_0_2", vec![0, 1])]);

        let memory = format_memory(&data, None).unwrap();
        assert_eq!(memory, vec!["001", "100"]);
    }

    #[test]
    fn test_unmeasured_bits_are_zero() {
        let data = measurements(vec![("c_5_0_0", vec![1, 1]), ("c_5_0_2", vec![1, 0])]);

        let memory = format_memory(&data, Some(2)).unwrap();
        assert_eq!(memory, vec!["00101", "00001"]);
    }

    #[test]
    fn test_descending_register_index_not_insertion_order() {
        let data = measurements(vec![
            ("a_1_2_0", vec![1]),
            ("b_1_0_0", vec![0]),
            ("c_1_1_0", vec![1]),
        ]);

        let memory = format_memory(&data, Some(1)).unwrap();
        assert_eq!(memory, vec!["1 1 0"]);
    }

    #[test]
    fn test_shot_count_mismatch() {
        let data = measurements(vec![("c_2_0_0", vec![0, 1, 1]), ("c_2_0_1", vec![1, 1])]);

        let err = format_memory(&data, Some(3)).unwrap_err();
        match err {
            JobError::ShapeMismatch {
                key,
                actual,
                expected,
            } => {
                assert_eq!(key, "c_2_0_1");
                assert_eq!(actual, (2, 1));
                assert_eq!(expected, (3, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_recorded_shots_override_data() {
        let data = measurements(vec![("c_1_0_0", vec![0, 1])]);

        let err = format_memory(&data, Some(4)).unwrap_err();
        assert!(matches!(err, JobError::ShapeMismatch { expected: (4, 1), .. }));
    }

    #[test]
    fn test_more_than_one_value_per_shot() {
        let mut data = Measurements::default();
        data.insert("c_2_0_0".into(), vec![vec![0, 1], vec![1, 1]]);

        let err = format_memory(&data, Some(2)).unwrap_err();
        assert!(matches!(
            err,
            JobError::ShapeMismatch {
                actual: (2, 2),
                expected: (2, 1),
                ..
            }
        ));
    }

    #[test]
    fn test_non_binary_value() {
        let data = measurements(vec![("c_1_0_0", vec![0, 2])]);

        let err = format_memory(&data, None).unwrap_err();
        assert!(matches!(err, JobError::InvalidBit { value: 2, .. }));
    }

    #[test]
    fn test_inconsistent_register_width() {
        let mut data = Measurements::default();
        data.insert("c_2_0_0".into(), vec![vec![1]]);
        data.insert("c_3_0_2".into(), vec![vec![1]]);

        let err = format_memory(&data, Some(1)).unwrap_err();
        assert!(matches!(err, JobError::InconsistentRegister { creg_idx: 0, .. }));
    }

    #[test]
    fn test_malformed_key_aborts() {
        let data = measurements(vec![("c_2_0_0", vec![1]), ("garbage", vec![1])]);

        let err = format_memory(&data, Some(1)).unwrap_err();
        assert!(matches!(err, JobError::MalformedKey(_)));
    }

    #[test]
    fn test_empty_measurements() {
        assert!(
            format_memory(&Measurements::default(), None)
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            format_memory(&Measurements::default(), Some(2)).unwrap(),
            vec!["", ""]
        );
    }

    #[test]
    fn test_zero_shots() {
        let data = measurements(vec![("c_2_0_0", vec![])]);

        assert!(format_memory(&data, None).unwrap().is_empty());
    }

    #[test]
    fn test_oversized_register_is_rejected() {
        let data = measurements(vec![("c_9223372036854775807_0_0", vec![1, 0])]);

        let err = format_memory(&data, None).unwrap_err();
        assert!(matches!(
            err,
            JobError::RegisterTooLarge {
                shots: 2,
                width: 9_223_372_036_854_775_807,
                ..
            }
        ));
        assert!(err.is_validation());
    }

    #[test]
    fn test_register_grid_size_overflow() {
        assert!(RegisterGrid::zeros(usize::MAX, 2).is_none());
        assert!(RegisterGrid::zeros(2, usize::MAX / 2).is_none());
        assert_eq!(RegisterGrid::zeros(0, usize::MAX).unwrap().width(), usize::MAX);
    }

    #[test]
    fn test_register_grid_rows() {
        let mut grid = RegisterGrid::zeros(2, 3).unwrap();
        grid.set_column(0, [1, 0].into_iter());
        grid.set_column(1, [1, 1].into_iter());

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.row_string(0), "011");
        assert_eq!(grid.row_string(1), "010");
    }
}
