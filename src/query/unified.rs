//! Unified query entrypoint.
//!
//! Most callers should use [`find_nth_min_from_path`], which validates the
//! request, decodes the first sheet of the workbook, and runs the streaming
//! selection.
//!
//! - Use [`QueryOptions::limits`] to adjust the source size ceiling.
//! - If a [`super::observability::QueryObserver`] is provided,
//!   success/failure/alerts are reported to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{SelectError, SelectResult};
use crate::select;

use super::decode::decode_first_sheet;
use super::observability::{QueryContext, QueryObserver, QuerySeverity, QueryStats};
use super::validate::{validate_source, SourceLimits};

/// Options controlling unified query behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct QueryOptions {
    /// Source file limits applied during validation.
    pub limits: SourceLimits,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn QueryObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: QuerySeverity,
}

impl fmt::Debug for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("limits", &self.limits)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            limits: SourceLimits::default(),
            observer: None,
            alert_at_or_above: QuerySeverity::Critical,
        }
    }
}

/// Find the n-th smallest integer in the workbook at `path` (rank 1 = smallest).
///
/// Pipeline: validate preconditions, decode the first sheet, scan once with a
/// bounded selection window. The whole call is synchronous and owns all of
/// its state; the workbook handle is released before this function returns.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row-count and result stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >=
///   `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use xlsx_nth_min::query::{find_nth_min_from_path, QueryOptions};
///
/// # fn main() -> Result<(), xlsx_nth_min::SelectError> {
/// let third_smallest = find_nth_min_from_path("numbers.xlsx", 3, &QueryOptions::default())?;
/// println!("3rd minimum = {third_smallest}");
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (stderr logging + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use xlsx_nth_min::query::{find_nth_min_from_path, QueryOptions, QuerySeverity, StdErrObserver};
///
/// let opts = QueryOptions {
///     observer: Some(Arc::new(StdErrObserver)),
///     alert_at_or_above: QuerySeverity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are Critical and will trigger `on_alert` at this threshold.
/// let _err = find_nth_min_from_path("does_not_exist.xlsx", 3, &opts).unwrap_err();
/// ```
pub fn find_nth_min_from_path(
    path: impl AsRef<Path>,
    n: i64,
    options: &QueryOptions,
) -> SelectResult<i64> {
    let path = path.as_ref();

    let ctx = QueryContext {
        path: path.to_path_buf(),
        n,
    };

    let result = run_query(path, n, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((rows, value)) => obs.on_success(
                &ctx,
                QueryStats {
                    rows: *rows,
                    result: *value,
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(_, value)| value)
}

fn run_query(path: &Path, n: i64, options: &QueryOptions) -> SelectResult<(usize, i64)> {
    let path_str = path.to_str().ok_or_else(|| SelectError::InvalidArgument {
        message: format!("path is not valid UTF-8: {}", path.display()),
    })?;
    validate_source(path_str, n, &options.limits)?;

    let sheet = decode_first_sheet(path)?;

    // n > 0 was established by validation.
    let value = select::nth_min(&sheet, n as usize)?;
    Ok((sheet.row_count(), value))
}

fn severity_for_error(e: &SelectError) -> QuerySeverity {
    match e {
        // Filesystem and decoder failures are infrastructure-class.
        SelectError::NotFound { .. }
        | SelectError::PermissionDenied { .. }
        | SelectError::SourceUnreadable { .. } => QuerySeverity::Critical,
        SelectError::InvalidArgument { .. } | SelectError::InsufficientData { .. } => {
            QuerySeverity::Error
        }
    }
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue queries in a job system.
#[derive(Clone)]
pub struct QueryRequest {
    /// Path to the source workbook.
    pub path: PathBuf,
    /// The requested rank (1-based).
    pub n: i64,
    /// Options controlling the query.
    pub options: QueryOptions,
}

impl fmt::Debug for QueryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryRequest")
            .field("path", &self.path)
            .field("n", &self.n)
            .field("options", &self.options)
            .finish()
    }
}

impl QueryRequest {
    /// Execute the request by calling [`find_nth_min_from_path`].
    pub fn run(&self) -> SelectResult<i64> {
        find_nth_min_from_path(&self.path, self.n, &self.options)
    }
}
