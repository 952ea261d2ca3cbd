mod fixtures;

use std::path::PathBuf;

use claim::*;
use pretty_assertions::assert_eq;

use benchplot::error::DataError;
use benchplot::{BenchmarkSource, Column, Metric, TestPhase};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

#[test]
fn test_load_pod_cpu_table() {
    fixtures::init_tracing();

    let source = assert_ok!(BenchmarkSource::from_path(data_path("pod_cpu_results.csv")));
    assert_eq!(source.test_phase, TestPhase::Pod);
    assert_eq!(source.metric, Metric::Cpu);

    let data = assert_ok!(source.load());
    assert_eq!(data.len(), 4);
    assert_eq!(data.steps[0], "5 pods");

    let admission = data.series_for(Column::Admission).expect("admission series");
    assert_eq!(admission.values, vec![50.0, 60.0, 70.0, 80.0]);
    let recommender = data.series_for(Column::Recommender).expect("recommender series");
    assert_eq!(recommender.values, vec![30.0, 35.0, 40.0, 45.0]);
    let updater = data.series_for(Column::Updater).expect("updater series");
    assert_eq!(updater.values, vec![20.0, 25.0, 30.0, 35.0]);
    let operator = data.series_for(Column::Operator).expect("operator series");
    assert_eq!(operator.values, vec![100.0, 110.0, 120.0, 130.0]);
}

#[test]
fn test_load_api_table_with_mixed_units() {
    fixtures::init_tracing();

    let source = assert_ok!(BenchmarkSource::from_path(data_path("deployment_api_results.csv")));
    assert_eq!(source.metric, Metric::Api);

    let data = assert_ok!(source.load());
    assert_eq!(data.len(), 4);

    let api = data.series_for(Column::ApiPerformance).expect("api performance series");
    assert_eq!(api.values, vec![30.2, 28.9, 25.4, 21.7]);
    let webhook = data.series_for(Column::Webhook).expect("webhook series");
    assert_eq!(webhook.values, vec![4.5, 5.1, 6.2, 7.9]);
    let latency = data.series_for(Column::RequestLatency).expect("request latency series");
    assert_eq!(latency.values, vec![12.1, 13.4, 15.0, 18.3]);
}

#[test]
fn test_malformed_cell_is_fatal() {
    fixtures::init_tracing();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pod_cpu_results.csv");
    std::fs::write(&path, "Step;Operator;Admission;Recommender;Updater\n5 pods;100m;fastm;30m;20m\n")
        .expect("write csv");

    let source = assert_ok!(BenchmarkSource::from_path(&path));
    let err = assert_err!(source.load());
    assert!(matches!(
        err,
        DataError::MalformedCell { column: Column::Admission, .. }
    ));
}

#[test]
fn test_missing_column_is_fatal() {
    fixtures::init_tracing();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pod_cpu_results.csv");
    std::fs::write(&path, "Step;Admission;Recommender;Updater\n5 pods;50m;30m;20m\n").expect("write csv");

    let source = assert_ok!(BenchmarkSource::from_path(&path));
    let err = assert_err!(source.load());
    assert!(matches!(err, DataError::Csv(_)));
}

#[test]
fn test_empty_table_is_fatal() {
    fixtures::init_tracing();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("idle_cpu_results.csv");
    std::fs::write(&path, "Step;Operator;Admission;Recommender;Updater\n").expect("write csv");

    let source = assert_ok!(BenchmarkSource::from_path(&path));
    let err = assert_err!(source.load());
    assert!(matches!(err, DataError::EmptyTable(_)));
}

#[test]
fn test_missing_file_is_fatal() {
    fixtures::init_tracing();

    let source = assert_ok!(BenchmarkSource::from_path("/nonexistent/pod_cpu_results.csv"));
    let err = assert_err!(source.load());
    assert!(matches!(err, DataError::Csv(_)));
}
