use std::sync::{Arc, Mutex};

use rust_data_exercises::ingestion::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
};
use rust_data_exercises::trips::{load_data, City, LoadOptions};
use rust_data_exercises::IngestionError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(City, IngestionStats)>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.successes.lock().unwrap().push((ctx.city, stats));
    }

    fn on_failure(
        &self,
        _ctx: &IngestionContext,
        severity: IngestionSeverity,
        _error: &IngestionError,
    ) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(
        &self,
        _ctx: &IngestionContext,
        severity: IngestionSeverity,
        _error: &IngestionError,
    ) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(data_dir: &str, obs: Arc<dyn IngestionObserver>) -> LoadOptions {
    LoadOptions {
        data_dir: data_dir.into(),
        observer: Some(obs),
        alert_at_or_above: IngestionSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());

    // Missing file -> Io error -> Critical
    let opts = options("tests/fixtures/does_not_exist", obs.clone());
    let _ = load_data(City::Chicago, &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![IngestionSeverity::Critical]);
    assert_eq!(alerts, vec![IngestionSeverity::Critical]);
    assert!(obs.successes.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());

    // Bad timestamp -> parse error -> Error severity (not Critical) -> should not alert
    let opts = options("tests/fixtures/broken", obs.clone());
    let err = load_data(City::Chicago, &opts).unwrap_err();
    assert!(matches!(err, IngestionError::ParseError { row: 3, .. }));

    // Missing `Start Time` -> schema mismatch -> Error
    let err = load_data(City::Washington, &opts).unwrap_err();
    assert!(matches!(err, IngestionError::SchemaMismatch { .. }));

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![IngestionSeverity::Error, IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_alert_threshold_alerts_on_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        alert_at_or_above: IngestionSeverity::Error,
        ..options("tests/fixtures/broken", obs.clone())
    };

    let _ = load_data(City::Chicago, &opts).unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
}

#[test]
fn observer_receives_row_counts_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        month: "january".parse().unwrap(),
        ..options("tests/fixtures", obs.clone())
    };

    let ds = load_data(City::NewYorkCity, &opts).unwrap();
    assert_eq!(ds.row_count(), 2);

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(
        successes,
        vec![(
            City::NewYorkCity,
            IngestionStats {
                rows_read: 3,
                rows_cleaned: 3,
                rows: 2,
            }
        )]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn composite_observer_fans_out() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let composite = Arc::new(CompositeObserver::new(vec![
        first.clone() as Arc<dyn IngestionObserver>,
        second.clone(),
    ]));

    let opts = options("tests/fixtures/does_not_exist", composite);
    let _ = load_data(City::Chicago, &opts).unwrap_err();

    for obs in [&first, &second] {
        assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
        assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
    }
}

#[test]
fn dirty_data_is_cleaned_during_load() {
    let obs = Arc::new(RecordingObserver::default());

    let opts = options("tests/fixtures/dirty", obs.clone());
    let ds = load_data(City::Chicago, &opts).unwrap();

    assert_eq!(ds.row_count(), 13);
    let (_, stats) = obs.successes.lock().unwrap()[0];
    assert_eq!((stats.rows_read, stats.rows_cleaned, stats.rows), (19, 13, 13));
}
