pub mod chart;
pub mod elements;
pub mod error;
pub mod settings;
pub mod source;
pub mod tracing;
pub mod workloads;

pub use elements::{BenchmarkData, Column, LinearFit, Metric, Series, TestPhase, Unit};
pub use source::BenchmarkSource;

pub type BenchplotResult<T> = Result<T, error::BenchplotError>;
