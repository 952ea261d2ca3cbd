pub use data_set::{BenchmarkData, Series};
pub use fit::LinearFit;
pub use metric::{Column, Metric, Unit};
pub use test_phase::TestPhase;

mod data_set;
mod fit;
mod metric;
mod test_phase;
