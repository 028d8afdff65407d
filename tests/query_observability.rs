use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use xlsx_nth_min::query::{
    find_nth_min_from_path, CompositeObserver, FileObserver, QueryContext, QueryObserver,
    QueryOptions, QuerySeverity, QueryStats,
};
use xlsx_nth_min::SelectError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<QueryStats>>,
    failures: Mutex<Vec<QuerySeverity>>,
    alerts: Mutex<Vec<QuerySeverity>>,
}

impl QueryObserver for RecordingObserver {
    fn on_success(&self, _ctx: &QueryContext, stats: QueryStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &QueryContext, severity: QuerySeverity, _error: &SelectError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &QueryContext, severity: QuerySeverity, _error: &SelectError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("xlsx-nth-min-{name}-{nanos}.xlsx"))
}

fn write_numbers_xlsx(path: &PathBuf, numbers: &[i64]) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    for (i, v) in numbers.iter().enumerate() {
        ws.write_number(i as u32, 0, *v as f64).unwrap();
    }
    wb.save(path).unwrap();
}

fn opts_with(obs: Arc<RecordingObserver>) -> QueryOptions {
    QueryOptions {
        observer: Some(obs),
        alert_at_or_above: QuerySeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_success_stats() {
    let path = tmp_file("obs-ok");
    write_numbers_xlsx(&path, &[5, 1, 3]);

    let obs = Arc::new(RecordingObserver::default());
    let v = find_nth_min_from_path(&path, 2, &opts_with(obs.clone())).unwrap();
    assert_eq!(v, 3);

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes.len(), 1);
    assert_eq!(successes[0].rows, 3);
    assert_eq!(successes[0].result, 3);
    assert!(obs.failures.lock().unwrap().is_empty());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());
    let path = tmp_file("obs-missing");

    // Missing file -> NotFound -> Critical
    let _ = find_nth_min_from_path(&path, 2, &opts_with(obs.clone())).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![QuerySeverity::Critical]);
    assert_eq!(alerts, vec![QuerySeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_below_threshold() {
    let path = tmp_file("obs-insufficient");
    write_numbers_xlsx(&path, &[5, 1, 3]);

    let obs = Arc::new(RecordingObserver::default());

    // InsufficientData -> Error severity (not Critical) -> should not alert
    let _ = find_nth_min_from_path(&path, 10, &opts_with(obs.clone())).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![QuerySeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn composite_observer_fans_out_to_all_observers() {
    let path = tmp_file("obs-composite");
    write_numbers_xlsx(&path, &[5, 1, 3]);

    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let composite = Arc::new(CompositeObserver::new(vec![
        first.clone() as Arc<dyn QueryObserver>,
        second.clone() as Arc<dyn QueryObserver>,
    ]));

    let opts = QueryOptions {
        observer: Some(composite),
        ..Default::default()
    };
    let v = find_nth_min_from_path(&path, 1, &opts).unwrap();
    assert_eq!(v, 1);

    for obs in [&first, &second] {
        let successes = obs.successes.lock().unwrap().clone();
        assert_eq!(successes.len(), 1);
        assert_eq!(successes[0].result, 1);
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_observer_appends_event_lines() {
    let path = tmp_file("obs-file-src");
    write_numbers_xlsx(&path, &[5, 1, 3]);

    let log_path = std::env::temp_dir().join(format!(
        "xlsx-nth-min-obs-log-{}.log",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));

    let opts = QueryOptions {
        observer: Some(Arc::new(FileObserver::new(&log_path))),
        ..Default::default()
    };
    let _ = find_nth_min_from_path(&path, 2, &opts).unwrap();
    let _ = find_nth_min_from_path(&path, 10, &opts).unwrap_err();

    let log = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("ok") && lines[0].contains("result=3"));
    assert!(lines[1].contains("fail") && lines[1].contains("severity=Error"));

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&log_path);
}
