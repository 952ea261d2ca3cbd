use serde::{Deserialize, Serialize};

use super::{Column, Metric, TestPhase};

/// A normalized benchmark table: unit suffixes stripped, values held
/// column-major alongside the raw `Step` labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkData {
    pub metric: Metric,
    pub test_phase: TestPhase,
    /// raw `Step` labels, one per row
    pub steps: Vec<String>,
    /// one series per parsed column, each aligned with `steps`
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub column: Column,
    pub values: Vec<f64>,
}

impl BenchmarkData {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn series_for(&self, column: Column) -> Option<&Series> {
        self.series.iter().find(|series| series.column == column)
    }
}
