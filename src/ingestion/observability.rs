use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::IngestionError;
use crate::trips::City;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (load failed on bad data).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

impl IngestionSeverity {
    /// Classify a load failure.
    pub fn for_error(e: &IngestionError) -> Self {
        match e {
            IngestionError::Io(_) => IngestionSeverity::Critical,
            IngestionError::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
                _ => IngestionSeverity::Error,
            },
            IngestionError::SchemaMismatch { .. } => IngestionSeverity::Error,
            IngestionError::ParseError { .. } => IngestionSeverity::Error,
        }
    }
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// The backing file read for the city.
    pub path: PathBuf,
    /// City selected by the caller.
    pub city: City,
}

/// Row counts reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Rows read from the file.
    pub rows_read: usize,
    /// Rows left after the cleaning pipeline.
    pub rows_cleaned: usize,
    /// Rows left after month/weekday filtering.
    pub rows: usize,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when loading succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when loading fails.
    fn on_failure(
        &self,
        _ctx: &IngestionContext,
        _severity: IngestionSeverity,
        _error: &IngestionError,
    ) {
    }

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(
        &self,
        ctx: &IngestionContext,
        severity: IngestionSeverity,
        error: &IngestionError,
    ) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
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

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(
        &self,
        ctx: &IngestionContext,
        severity: IngestionSeverity,
        error: &IngestionError,
    ) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(
        &self,
        ctx: &IngestionContext,
        severity: IngestionSeverity,
        error: &IngestionError,
    ) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Forwards load events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        tracing::info!(
            city = %ctx.city,
            path = %ctx.path.display(),
            rows_read = stats.rows_read,
            rows_cleaned = stats.rows_cleaned,
            rows = stats.rows,
            "trip data loaded"
        );
    }

    fn on_failure(
        &self,
        ctx: &IngestionContext,
        severity: IngestionSeverity,
        error: &IngestionError,
    ) {
        tracing::error!(
            city = %ctx.city,
            path = %ctx.path.display(),
            ?severity,
            %error,
            "trip data load failed"
        );
    }

    fn on_alert(
        &self,
        ctx: &IngestionContext,
        severity: IngestionSeverity,
        error: &IngestionError,
    ) {
        tracing::error!(
            alert = true,
            city = %ctx.city,
            path = %ctx.path.display(),
            ?severity,
            %error,
            "trip data load failed"
        );
    }
}
