use crate::elements::{BenchmarkData, Column, Series, TestPhase};
use crate::error::DataError;

/// Literal prefix carried by every step label in a rate-limiter sweep.
pub const RATE_LIMITER_STEP_PREFIX: &str = "64 deployments ";

/// Synthetic step every idle row collapses to.
pub const IDLE_STEP: (&str, i64) = ("1 Idle", 1);

/// One of up to three row subsets compared within a single chart.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadGroup {
    /// legend suffix, e.g. `"2 pods"`; empty for single-group phases
    pub label: String,
    /// numeric x values shared by every series in the group
    pub steps: Vec<i64>,
    pub series: Vec<Series>,
}

impl WorkloadGroup {
    pub fn series_for(&self, column: Column) -> Option<&Series> {
        self.series.iter().find(|series| series.column == column)
    }
}

/// How a benchmark table is laid out on the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkloadPlan {
    /// plain line chart against categorical step labels, no trend lines
    Categorical { labels: Vec<String> },
    /// scatter plus a fitted trend line per workload group
    Groups(Vec<WorkloadGroup>),
}

/// Reshape the `Step` column for charting, per test phase.
///
/// The three-group phases slice rows into contiguous thirds with floor
/// division bounds and reuse the first third's step values as the shared
/// x axis for all three groups.
#[tracing::instrument(
    level = "debug",
    skip(data),
    fields(phase = %data.test_phase, rows = data.len()),
)]
pub fn plan(data: &BenchmarkData) -> Result<WorkloadPlan, DataError> {
    match data.test_phase {
        TestPhase::RateLimiters => Ok(WorkloadPlan::Categorical { labels: rate_limiter_labels(&data.steps) }),

        TestPhase::Idle => {
            let steps = data.steps.iter().map(|_| IDLE_STEP.1).collect();
            Ok(WorkloadPlan::Groups(vec![WorkloadGroup {
                label: String::new(),
                steps,
                series: data.series.clone(),
            }]))
        },

        TestPhase::Deployment | TestPhase::Pod => {
            let steps = data.steps.iter().map(|step| leading_count(step)).collect::<Result<_, _>>()?;
            Ok(WorkloadPlan::Groups(vec![WorkloadGroup {
                label: String::new(),
                steps,
                series: data.series.clone(),
            }]))
        },

        TestPhase::DeploymentPods => Ok(WorkloadPlan::Groups(replica_groups(data, "pods")?)),
        TestPhase::DeploymentContainers => Ok(WorkloadPlan::Groups(replica_groups(data, "containers")?)),
    }
}

/// Strip the fixed sweep prefix from each rate-limiter step label.
pub fn rate_limiter_labels(steps: &[String]) -> Vec<String> {
    steps.iter().map(|step| step.replace(RATE_LIMITER_STEP_PREFIX, "")).collect()
}

/// Slice rows into 1x/2x/4x replica groups. Group boundaries are exactly
/// `[0, n/3, 2n/3, n)` and groups two and three keep the first group's step
/// values as their x axis.
fn replica_groups(data: &BenchmarkData, noun: &str) -> Result<Vec<WorkloadGroup>, DataError> {
    let n = data.len();
    let bounds = [0, n / 3, 2 * n / 3, n];

    let shared: Vec<i64> =
        data.steps[bounds[0]..bounds[1]].iter().map(|step| leading_count(step)).collect::<Result<_, _>>()?;

    let mut groups = Vec::with_capacity(3);
    for (slot, factor) in [1, 2, 4].into_iter().enumerate() {
        let (lo, hi) = (bounds[slot], bounds[slot + 1]);
        let series = data
            .series
            .iter()
            .map(|series| Series { column: series.column, values: series.values[lo..hi].to_vec() })
            .collect();

        groups.push(WorkloadGroup {
            label: format!("{factor} {noun}"),
            steps: shared.clone(),
            series,
        });
    }

    Ok(groups)
}

/// Extract the leading integer from a `"<n> <workload>"` step label.
fn leading_count(step: &str) -> Result<i64, DataError> {
    step.trim()
        .split(' ')
        .next()
        .and_then(|token| token.parse::<i64>().ok())
        .ok_or_else(|| DataError::MalformedStep(step.to_string()))
}
