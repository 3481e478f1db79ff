use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::CodecError;

/// How bad a reported failure is. Ordered, so it can be compared against an alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CodecSeverity {
    Info,
    Warning,
    /// The call failed; the document or the records were at fault.
    Error,
    /// The call failed because the file or stream underneath it did.
    Critical,
}

/// Which way a codec call converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// CSV document to records.
    Decode,
    /// Records to CSV document.
    Encode,
}

/// Context about one encode or decode call.
#[derive(Debug, Clone)]
pub struct CodecContext {
    pub direction: Direction,
    /// Name of the record type, as declared in its descriptor.
    pub record_type: &'static str,
    /// File read or written, for path-based calls.
    pub path: Option<PathBuf>,
}

/// Stats reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecStats {
    /// Records decoded or encoded (excluding the header).
    pub records: usize,
    /// Fields bound to a column.
    pub bound_fields: usize,
    /// Document columns that matched no field (always 0 when encoding).
    pub ignored_columns: usize,
}

/// Receives the outcome of every option-driven encode and decode call.
pub trait CodecObserver: Send + Sync {
    /// Called when a call succeeds.
    fn on_success(&self, _ctx: &CodecContext, _stats: CodecStats) {}

    /// Called when a call fails.
    fn on_failure(&self, _ctx: &CodecContext, _severity: CodecSeverity, _error: &CodecError) {}

    /// Called after `on_failure` when the severity reaches the alert threshold.
    ///
    /// Forwards to [`Self::on_failure`] unless overridden.
    fn on_alert(&self, ctx: &CodecContext, severity: CodecSeverity, error: &CodecError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every callback to each wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn CodecObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn CodecObserver>>) -> Self {
        Self { observers }
    }

    /// Add another observer to the end of the fan-out list.
    pub fn push(&mut self, observer: Arc<dyn CodecObserver>) {
        self.observers.push(observer);
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeObserver({} observers)", self.observers.len())
    }
}

impl CodecObserver for CompositeObserver {
    fn on_success(&self, ctx: &CodecContext, stats: CodecStats) {
        self.observers.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &CodecContext, severity: CodecSeverity, error: &CodecError) {
        self.observers
            .iter()
            .for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &CodecContext, severity: CodecSeverity, error: &CodecError) {
        self.observers
            .iter()
            .for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// One observed outcome, rendered as a single log line.
#[derive(Clone, Copy)]
enum Event<'a> {
    Ok(CodecStats),
    Failed(CodecSeverity, &'a CodecError),
    Alert(CodecSeverity, &'a CodecError),
}

fn describe(ctx: &CodecContext, event: Event<'_>) -> String {
    let direction = match ctx.direction {
        Direction::Decode => "decode",
        Direction::Encode => "encode",
    };
    let ty = ctx.record_type;
    let mut line = match event {
        Event::Ok(_) => format!("ok {direction} type={ty}"),
        Event::Failed(sev, _) => format!("fail severity={sev:?} {direction} type={ty}"),
        Event::Alert(sev, _) => format!("ALERT severity={sev:?} {direction} type={ty}"),
    };
    if let Some(path) = &ctx.path {
        line.push_str(&format!(" path={}", path.display()));
    }
    match event {
        Event::Ok(stats) => line.push_str(&format!(
            " records={} bound={} ignored_columns={}",
            stats.records, stats.bound_fields, stats.ignored_columns
        )),
        Event::Failed(_, err) | Event::Alert(_, err) => line.push_str(&format!(" err={err}")),
    }
    line
}

/// Logs codec events to stderr, prefixed with `[csv]`.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl CodecObserver for StdErrObserver {
    fn on_success(&self, ctx: &CodecContext, stats: CodecStats) {
        eprintln!("[csv] {}", describe(ctx, Event::Ok(stats)));
    }

    fn on_failure(&self, ctx: &CodecContext, severity: CodecSeverity, error: &CodecError) {
        eprintln!("[csv] {}", describe(ctx, Event::Failed(severity, error)));
    }

    fn on_alert(&self, ctx: &CodecContext, severity: CodecSeverity, error: &CodecError) {
        eprintln!("[csv] {}", describe(ctx, Event::Alert(severity, error)));
    }
}

/// Appends one line per event to a log file, each prefixed with a unix timestamp.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileObserver {
    /// Log to `path`, creating it on first write. Write failures are dropped.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, ctx: &CodecContext, event: Event<'_>) {
        let Ok(mut slot) = self.file.lock() else {
            return;
        };
        if slot.is_none() {
            *slot = OpenOptions::new().create(true).append(true).open(&self.path).ok();
        }
        if let Some(file) = slot.as_mut() {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            let _ = writeln!(file, "{secs} {}", describe(ctx, event));
        }
    }
}

impl CodecObserver for FileObserver {
    fn on_success(&self, ctx: &CodecContext, stats: CodecStats) {
        self.write(ctx, Event::Ok(stats));
    }

    fn on_failure(&self, ctx: &CodecContext, severity: CodecSeverity, error: &CodecError) {
        self.write(ctx, Event::Failed(severity, error));
    }

    fn on_alert(&self, ctx: &CodecContext, severity: CodecSeverity, error: &CodecError) {
        self.write(ctx, Event::Alert(severity, error));
    }
}

/// Severity of a failed call: I/O trouble is critical, everything else is an error.
pub fn severity_for_error(e: &CodecError) -> CodecSeverity {
    match e {
        CodecError::Io(_) => CodecSeverity::Critical,
        CodecError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => CodecSeverity::Critical,
            _ => CodecSeverity::Error,
        },
        CodecError::InvalidTarget { .. }
        | CodecError::MalformedDocument { .. }
        | CodecError::ParseError { .. }
        | CodecError::CustomCodec { .. }
        | CodecError::UnsupportedType { .. }
        | CodecError::MissingCell { .. }
        | CodecError::Config { .. } => CodecSeverity::Error,
    }
}
