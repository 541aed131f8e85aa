//! One emitted pair.

use serde::{Deserialize, Serialize};
use super::{DELIMITER, format_float};

/// Result record for an evaluated pair. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    pub source: String,
    pub target: String,
    pub p_value: f64,
    /// Present only for co-occurrence runs. `NaN` when no connector is shared.
    pub avg_synthetic_distance: Option<f64>,
    pub successes: u64,
    pub observations: u64,
    pub rate: f64,
    /// `round(rate * observations)`.
    pub expected: u64,
    pub source_degree: u64,
    pub target_degree: u64,
    pub source_fraction: f64,
    pub target_fraction: f64,
    /// `p_value <= corrected threshold`. Not written to the row.
    pub significant: bool,
}

impl PairResult {
    /// Tab-separated row, newline terminated.
    pub fn to_row(&self) -> String {
        let mut fields = Vec::with_capacity(12);
        fields.push(self.source.clone());
        fields.push(self.target.clone());
        fields.push(format_float(self.p_value));
        if let Some(distance) = self.avg_synthetic_distance {
            fields.push(format_float(distance));
        }
        fields.push(self.successes.to_string());
        fields.push(self.observations.to_string());
        fields.push(format_float(self.rate));
        fields.push(self.expected.to_string());
        fields.push(self.source_degree.to_string());
        fields.push(self.target_degree.to_string());
        fields.push(format_float(self.source_fraction));
        fields.push(format_float(self.target_fraction));

        let mut row = fields.join(DELIMITER);
        row.push('\n');
        row
    }

    /// Number of columns this record writes.
    pub fn column_count(&self) -> usize {
        if self.avg_synthetic_distance.is_some() { 12 } else { 11 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(distance: Option<f64>) -> PairResult {
        PairResult {
            source: "X".into(),
            target: "Y".into(),
            p_value: 1.0,
            avg_synthetic_distance: distance,
            successes: 1,
            observations: 3,
            rate: 0.5,
            expected: 2,
            source_degree: 2,
            target_degree: 2,
            source_fraction: 0.25,
            target_fraction: 0.75,
            significant: false,
        }
    }

    #[test]
    fn test_row_with_distance() {
        let row = sample(Some(0.5)).to_row();
        assert_eq!(row, "X\tY\t1\t0.5\t1\t3\t0.5\t2\t2\t2\t0.25\t0.75\n");
    }

    #[test]
    fn test_row_without_distance() {
        let rec = sample(None);
        let row = rec.to_row();
        assert_eq!(row, "X\tY\t1\t1\t3\t0.5\t2\t2\t2\t0.25\t0.75\n");
        assert_eq!(row.trim_end().split('\t').count(), rec.column_count());
    }

    #[test]
    fn test_nan_distance_is_written_as_nan() {
        let row = sample(Some(f64::NAN)).to_row();
        assert!(row.starts_with("X\tY\t1\tnan\t"));
    }
}
