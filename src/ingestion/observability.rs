//! Load observers: hooks for logging rejected rows and load outcomes.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{LoadError, RejectReason};

/// How serious a load event is. Ordered, so it can be compared against an alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Routine event.
    Info,
    /// Something odd that did not stop the load.
    Warning,
    /// The load failed.
    Error,
    /// The source could not be read at all (I/O).
    Critical,
}

/// Context about a load attempt.
#[derive(Debug, Clone, Default)]
pub struct LoadContext {
    /// The input path, if the rows came from a file.
    pub path: Option<PathBuf>,
}

impl LoadContext {
    fn source(&self) -> String {
        match &self.path {
            Some(p) => p.display().to_string(),
            None => "<rows>".to_string(),
        }
    }
}

/// Stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Rows turned into records.
    pub accepted: usize,
    /// Rows discarded by the normalizer.
    pub rejected: usize,
    /// Distinct brands among accepted records.
    pub brands: usize,
}

/// Observer interface for load outcomes.
///
/// Every method has a no-op default, so implementors only override what they care about.
pub trait LoadObserver: Send + Sync {
    /// Called once per rejected row. `row` is the 1-based line in the source (header is row 1).
    fn on_row_rejected(&self, _ctx: &LoadContext, _row: usize, _reason: &RejectReason) {}

    /// Called when a load succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &LoadError) {}

    /// Called when a load failure meets an alert threshold.
    ///
    /// Forwards to [`Self::on_failure`] unless overridden.
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Fans every callback out to several observers (e.g. stderr plus a log file).
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    /// Wrap `observers`; callbacks reach them in order.
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
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

impl LoadObserver for CompositeObserver {
    fn on_row_rejected(&self, ctx: &LoadContext, row: usize, reason: &RejectReason) {
        for o in &self.observers {
            o.on_row_rejected(ctx, row, reason);
        }
    }

    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs load events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl LoadObserver for StdErrObserver {
    fn on_row_rejected(&self, ctx: &LoadContext, row: usize, reason: &RejectReason) {
        eprintln!("[load][skip] source={} row={row} reason={reason}", ctx.source());
    }

    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        eprintln!(
            "[load][ok] source={} accepted={} rejected={} brands={}",
            ctx.source(),
            stats.accepted,
            stats.rejected,
            stats.brands
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        eprintln!("[load][{severity:?}] source={} err={error}", ctx.source());
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        eprintln!("[ALERT][load][{severity:?}] source={} err={error}", ctx.source());
    }
}

/// Appends load events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Log to `path`, creating it if needed.
    ///
    /// Logging never fails a load: open and write errors are dropped.
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

impl LoadObserver for FileObserver {
    fn on_row_rejected(&self, ctx: &LoadContext, row: usize, reason: &RejectReason) {
        self.append_line(&format!(
            "{} skip source={} row={row} reason={reason}",
            unix_ts(),
            ctx.source()
        ));
    }

    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.append_line(&format!(
            "{} ok source={} accepted={} rejected={} brands={}",
            unix_ts(),
            ctx.source(),
            stats.accepted,
            stats.rejected,
            stats.brands
        ));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.append_line(&format!(
            "{} fail severity={severity:?} source={} err={error}",
            unix_ts(),
            ctx.source()
        ));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.append_line(&format!(
            "{} ALERT severity={severity:?} source={} err={error}",
            unix_ts(),
            ctx.source()
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
