use std::sync::{Arc, Mutex};

use csv_record_codec::document::{
    CodecContext, CodecObserver, CodecSeverity, CodecStats, CompositeObserver, Direction,
    FileObserver, severity_for_error,
};
use csv_record_codec::{
    CodecError, CodecOptions, FieldKind, decode_document, decode_from_path, encode_document, record,
};

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(Direction, &'static str, CodecStats)>>,
    failures: Mutex<Vec<CodecSeverity>>,
    alerts: Mutex<Vec<CodecSeverity>>,
}

impl CodecObserver for RecordingObserver {
    fn on_success(&self, ctx: &CodecContext, stats: CodecStats) {
        self.successes
            .lock()
            .unwrap()
            .push((ctx.direction, ctx.record_type, stats));
    }

    fn on_failure(&self, _ctx: &CodecContext, severity: CodecSeverity, _error: &CodecError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &CodecContext, severity: CodecSeverity, _error: &CodecError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

record! {
    #[derive(Debug, Default)]
    pub struct Row2 {
        #[csv(rename = "id")]
        pub id: i64,
    }
}

fn options(obs: &Arc<RecordingObserver>, alert_at_or_above: CodecSeverity) -> CodecOptions {
    CodecOptions {
        observer: Some(obs.clone()),
        alert_at_or_above,
        ..Default::default()
    }
}

#[test]
fn success_reports_direction_type_and_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options(&obs, CodecSeverity::Critical);

    let mut out: Vec<Row2> = Vec::new();
    decode_document(b"id,extra\n1,a\n2,b\n", &mut out, &opts).unwrap();
    encode_document(&out, &opts).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(
        successes,
        vec![
            (
                Direction::Decode,
                "Row2",
                CodecStats { records: 2, bound_fields: 1, ignored_columns: 1 }
            ),
            (
                Direction::Encode,
                "Row2",
                CodecStats { records: 2, bound_fields: 1, ignored_columns: 0 }
            ),
        ]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn missing_file_is_critical_and_alerts() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options(&obs, CodecSeverity::Critical);

    let mut out: Vec<Row2> = Vec::new();
    let err = decode_from_path("tests/fixtures/does_not_exist.csv", &mut out, &opts).unwrap_err();
    assert!(matches!(err, CodecError::Io(_)));

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![CodecSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![CodecSeverity::Critical]);
}

#[test]
fn parse_failure_is_an_error_without_alert() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options(&obs, CodecSeverity::Critical);

    let mut out: Vec<Row2> = Vec::new();
    let _ = decode_document(b"id\nnope\n", &mut out, &opts).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![CodecSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_threshold_alerts_on_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options(&obs, CodecSeverity::Warning);

    let mut out = vec![Row2::default()];
    let err = decode_document(b"id\n1\n", &mut out, &opts).unwrap_err();
    assert!(matches!(err, CodecError::InvalidTarget { .. }));
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![CodecSeverity::Error]);
}

#[test]
fn composite_and_file_observers_fan_out() {
    let path = std::env::temp_dir().join(format!("csv_record_codec_obs_{}.log", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let recording = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn CodecObserver>> = vec![
        recording.clone() as Arc<dyn CodecObserver>,
        Arc::new(FileObserver::new(&path)) as Arc<dyn CodecObserver>,
    ];
    let composite = CompositeObserver::new(observers);
    let opts = CodecOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    let mut out: Vec<Row2> = Vec::new();
    decode_document(b"id\n7\n", &mut out, &opts).unwrap();

    assert_eq!(recording.successes.lock().unwrap().len(), 1);
    let log = std::fs::read_to_string(&path).unwrap();
    assert!(log.contains("ok decode type=Row2 records=1 bound=1 ignored_columns=0"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn only_io_failures_are_critical() {
    let io = CodecError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
    assert_eq!(severity_for_error(&io), CodecSeverity::Critical);

    let unsupported = CodecError::UnsupportedType {
        field: "tags".to_string(),
        kind: FieldKind::Map,
    };
    assert_eq!(severity_for_error(&unsupported), CodecSeverity::Error);
}

#[test]
fn file_observer_logs_failures_and_alerts_with_path() {
    let log_path = std::env::temp_dir().join(format!("csv_record_codec_fail_{}.log", std::process::id()));
    let _ = std::fs::remove_file(&log_path);

    let mut composite = CompositeObserver::default();
    composite.push(Arc::new(FileObserver::new(&log_path)));
    let opts = CodecOptions {
        observer: Some(Arc::new(composite)),
        alert_at_or_above: CodecSeverity::Critical,
        ..Default::default()
    };

    let mut out: Vec<Row2> = Vec::new();
    let _ = decode_from_path("tests/fixtures/missing.csv", &mut out, &opts).unwrap_err();

    let log = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<_> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("fail severity=Critical decode type=Row2 path=tests/fixtures/missing.csv err=io error"));
    assert!(lines[1].contains("ALERT severity=Critical decode type=Row2"));
    let _ = std::fs::remove_file(&log_path);
}
