use criterion::{black_box, criterion_group, Criterion};

use benchplot::elements::{Column, LinearFit, Metric, Series, TestPhase, Unit};
use benchplot::workloads;
use benchplot::BenchmarkData;

fn bench_unit_normalization(c: &mut Criterion) {
    c.bench_function("normalize_millicores", |b| {
        b.iter(|| Unit::Millicores.parse(black_box(" 250m ")))
    });
    c.bench_function("normalize_requests_per_second", |b| {
        b.iter(|| Unit::RequestsPerSecond.parse(black_box("30.2req/s")))
    });
}

fn bench_linear_fit(c: &mut Criterion) {
    let steps: Vec<i64> = (1..=64).collect();
    let values: Vec<f64> = steps.iter().map(|step| 3.5 * *step as f64 + 12.0).collect();

    c.bench_function("linear_fit_64_points", |b| {
        b.iter(|| LinearFit::from_series(black_box(&steps), black_box(&values)))
    });
}

fn bench_workload_partition(c: &mut Criterion) {
    let steps: Vec<String> = (0..3)
        .flat_map(|_| (1..=32).map(|n| format!("{n} deployments")))
        .collect();
    let values: Vec<f64> = (0..steps.len()).map(|n| n as f64).collect();
    let data = BenchmarkData {
        metric: Metric::Cpu,
        test_phase: TestPhase::DeploymentPods,
        steps,
        series: vec![Series { column: Column::Admission, values }],
    };

    c.bench_function("partition_replica_groups", |b| b.iter(|| workloads::plan(black_box(&data))));
}

criterion_group!(
    benches,
    bench_unit_normalization,
    bench_linear_fit,
    bench_workload_partition
);
