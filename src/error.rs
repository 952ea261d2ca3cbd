use std::path::PathBuf;

use thiserror::Error;

use crate::elements::{Column, Unit};

#[derive(Debug, Error)]
pub enum BenchplotError {
    #[error("{0}")]
    Input(#[from] InputError),

    #[error("{0}")]
    Data(#[from] DataError),

    #[error("{0}")]
    Chart(#[from] ChartError),
}

/// Violations of the `<test_phase>_<metric>_results.csv` file naming contract.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid file, {0}: must end with results.csv")]
    Suffix(String),

    #[error("invalid metric {token:?} in file name: must look like <test_phase>_<metric>_results.csv")]
    Metric { token: String },

    #[error("invalid test phase {token:?} in file name: must look like <test_phase>_<metric>_results.csv")]
    TestPhase { token: String },

    #[error("file name {0:?} is missing tokens: must look like <test_phase>_<metric>_results.csv")]
    Tokens(String),

    #[error("path {0:?} has no file name")]
    NoFileName(PathBuf),
}

/// Set of errors occurring while loading and reshaping a benchmark table.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("could not parse {column} cell {cell:?}: expected \"<number>{unit}\"")]
    MalformedCell { column: Column, cell: String, unit: Unit },

    #[error("step label {0:?} does not start with an integer workload count")]
    MalformedStep(String),

    #[error("benchmark table {0:?} contains no rows")]
    EmptyTable(PathBuf),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("{0}")]
    Data(#[from] DataError),

    #[error("{0}")]
    Render(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
#[error("could not fit a regression line: {0}")]
pub struct FitError(pub String);
