use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::elements::{BenchmarkData, Column, Metric, Series, TestPhase};
use crate::error::{DataError, InputError};

const RESULTS_SUFFIX: &str = "results.csv";

/// A benchmark CSV whose file name satisfies the
/// `<test_phase>_<metric>_results.csv` naming contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkSource {
    pub path: PathBuf,
    pub test_phase: TestPhase,
    pub metric: Metric,
}

/// Raw cpu/memory row as it appears in the CSV, values still unit-suffixed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResourceRecord {
    step: String,
    operator: String,
    admission: String,
    recommender: String,
    updater: String,
}

/// Raw api row, values still unit-suffixed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiRecord {
    step: String,
    #[serde(rename = "APIPerformance")]
    api_performance: String,
    webhook: String,
    request_latency: String,
}

impl BenchmarkSource {
    /// Decode the test phase and metric from the file name. The basename must
    /// tokenize on `_` such that the last token is `results.csv`, the
    /// second-to-last a metric and the third-to-last a test phase.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| InputError::NoFileName(path.clone()))?;

        let tokens: Vec<&str> = name.split('_').collect();
        let suffix = tokens[tokens.len() - 1];
        if suffix != RESULTS_SUFFIX {
            return Err(InputError::Suffix(name.to_string()));
        }
        if tokens.len() < 3 {
            return Err(InputError::Tokens(name.to_string()));
        }

        let metric_token = tokens[tokens.len() - 2];
        let metric = metric_token
            .parse::<Metric>()
            .map_err(|_| InputError::Metric { token: metric_token.to_string() })?;

        let phase_token = tokens[tokens.len() - 3];
        let test_phase = phase_token
            .parse::<TestPhase>()
            .map_err(|_| InputError::TestPhase { token: phase_token.to_string() })?;

        tracing::info!(%metric, %test_phase, path = %path.display(), "decoded benchmark source");
        Ok(Self { path, test_phase, metric })
    }

    /// Load the semicolon-delimited CSV and normalize every metric column to
    /// bare floats. Malformed cells are fatal.
    #[tracing::instrument(level = "info", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<BenchmarkData, DataError> {
        let mut reader = csv::ReaderBuilder::new().delimiter(b';').from_path(&self.path)?;

        let mut steps: Vec<String> = Vec::new();
        let mut series: Vec<Series> = self
            .metric
            .columns()
            .iter()
            .map(|column| Series { column: *column, values: Vec::new() })
            .collect();

        match self.metric {
            Metric::Cpu | Metric::Memory => {
                for record in reader.deserialize() {
                    let record: ResourceRecord = record?;
                    let row = [
                        (Column::Operator, record.operator),
                        (Column::Admission, record.admission),
                        (Column::Recommender, record.recommender),
                        (Column::Updater, record.updater),
                    ];
                    self.push_row(&mut series, row)?;
                    steps.push(record.step);
                }
            },

            Metric::Api => {
                for record in reader.deserialize() {
                    let record: ApiRecord = record?;
                    let row = [
                        (Column::ApiPerformance, record.api_performance),
                        (Column::Webhook, record.webhook),
                        (Column::RequestLatency, record.request_latency),
                    ];
                    self.push_row(&mut series, row)?;
                    steps.push(record.step);
                }
            },
        }

        if steps.is_empty() {
            return Err(DataError::EmptyTable(self.path.clone()));
        }

        tracing::info!(rows = steps.len(), columns = series.len(), "loaded benchmark table");
        Ok(BenchmarkData { metric: self.metric, test_phase: self.test_phase, steps, series })
    }

    fn push_row<const N: usize>(
        &self, series: &mut [Series], row: [(Column, String); N],
    ) -> Result<(), DataError> {
        for (series, (column, cell)) in series.iter_mut().zip(row) {
            debug_assert_eq!(series.column, column);
            series.values.push(self.normalize(column, &cell)?);
        }
        Ok(())
    }

    fn normalize(&self, column: Column, cell: &str) -> Result<f64, DataError> {
        let unit = self.metric.unit_for(column);
        unit.parse(cell).map_err(|_| DataError::MalformedCell {
            column,
            cell: cell.to_string(),
            unit,
        })
    }
}
