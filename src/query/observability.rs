use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::SelectError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QuerySeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the query failed on caller input).
    Error,
    /// Critical failure (filesystem or decoder infrastructure).
    Critical,
}

/// Context about a query attempt.
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// The source path used for the query.
    pub path: PathBuf,
    /// The requested rank.
    pub n: i64,
}

/// Minimal stats reported on successful queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryStats {
    /// Number of decoded sheet rows scanned.
    pub rows: usize,
    /// The n-th minimum that was returned.
    pub result: i64,
}

/// Observer interface for query outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait QueryObserver: Send + Sync {
    /// Called when a query succeeds.
    fn on_success(&self, _ctx: &QueryContext, _stats: QueryStats) {}

    /// Called when a query fails.
    fn on_failure(&self, _ctx: &QueryContext, _severity: QuerySeverity, _error: &SelectError) {}

    /// Called when a query failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &SelectError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn QueryObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn QueryObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl QueryObserver for CompositeObserver {
    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &QueryContext, severity: QuerySeverity, error: &SelectError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &SelectError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs query events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl QueryObserver for StdErrObserver {
    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        eprintln!(
            "[nth-min][ok] path={} n={} rows={} result={}",
            ctx.path.display(),
            ctx.n,
            stats.rows,
            stats.result
        );
    }

    fn on_failure(&self, ctx: &QueryContext, severity: QuerySeverity, error: &SelectError) {
        eprintln!(
            "[nth-min][{:?}] path={} n={} err={}",
            severity,
            ctx.path.display(),
            ctx.n,
            error
        );
    }

    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &SelectError) {
        eprintln!(
            "[ALERT][nth-min][{:?}] path={} n={} err={}",
            severity,
            ctx.path.display(),
            ctx.n,
            error
        );
    }
}

/// Appends query events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl QueryObserver for FileObserver {
    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        self.append_line(&format!(
            "{} ok path={} n={} rows={} result={}",
            unix_ts(),
            ctx.path.display(),
            ctx.n,
            stats.rows,
            stats.result
        ));
    }

    fn on_failure(&self, ctx: &QueryContext, severity: QuerySeverity, error: &SelectError) {
        self.append_line(&format!(
            "{} fail severity={:?} path={} n={} err={}",
            unix_ts(),
            severity,
            ctx.path.display(),
            ctx.n,
            error
        ));
    }

    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &SelectError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} path={} n={} err={}",
            unix_ts(),
            severity,
            ctx.path.display(),
            ctx.n,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
