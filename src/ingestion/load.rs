//! Aggregate load: source rows → normalized records, with accepted/rejected accounting.
//!
//! Most callers should use [`load_from_path`] (CSV on disk) or [`load_from_rows`] (rows produced
//! by any other source).
//!
//! - Malformed rows are discarded one by one and counted; they never abort the load.
//! - A load that ends with zero accepted rows fails with [`LoadError::NoValidRows`].
//! - If a [`LoadObserver`] is provided, rejections, success, failure and alerts are reported to it.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{LoadError, LoadResult};
use crate::types::{RawRow, Record};

use super::csv;
use super::normalize::validate_row;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Options controlling load behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Accepted records, in source order. Never empty.
    pub records: Vec<Record>,
    /// Number of rows the normalizer discarded.
    pub rejected: usize,
}

impl LoadReport {
    /// Number of accepted rows.
    pub fn accepted(&self) -> usize {
        self.records.len()
    }
}

/// Load and normalize a CSV file.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use car_ranking::ingestion::{load_from_path, LoadOptions, LoadSeverity, StdErrObserver};
///
/// # fn main() -> Result<(), car_ranking::LoadError> {
/// let opts = LoadOptions {
///     observer: Some(Arc::new(StdErrObserver::default())),
///     alert_at_or_above: LoadSeverity::Critical,
/// };
///
/// let report = load_from_path("USA_cars_datasets.csv", &opts)?;
/// println!("accepted={} rejected={}", report.accepted(), report.rejected);
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<LoadReport> {
    let path = path.as_ref();
    let ctx = LoadContext {
        path: Some(path.to_path_buf()),
    };

    let result = csv::read_csv_rows_from_path(path).and_then(|rows| normalize_all(&ctx, rows, options));
    report_outcome(&ctx, &result, options);
    result
}

/// Normalize rows that were produced by some other tabular source.
pub fn load_from_rows<I>(rows: I, options: &LoadOptions) -> LoadResult<LoadReport>
where
    I: IntoIterator<Item = RawRow>,
{
    let ctx = LoadContext::default();
    let result = normalize_all(&ctx, rows, options);
    report_outcome(&ctx, &result, options);
    result
}

fn normalize_all<I>(ctx: &LoadContext, rows: I, options: &LoadOptions) -> LoadResult<LoadReport>
where
    I: IntoIterator<Item = RawRow>,
{
    let mut records = Vec::new();
    let mut rejected = 0usize;

    for (row_idx0, row) in rows.into_iter().enumerate() {
        match validate_row(&row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                rejected += 1;
                if let Some(obs) = options.observer.as_ref() {
                    // 1-based, and the header occupies row 1.
                    obs.on_row_rejected(ctx, row_idx0 + 2, &reason);
                }
            }
        }
    }

    if records.is_empty() {
        return Err(LoadError::NoValidRows { rejected });
    }
    Ok(LoadReport { records, rejected })
}

fn report_outcome(ctx: &LoadContext, result: &LoadResult<LoadReport>, options: &LoadOptions) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(report) => {
            let brands = report
                .records
                .iter()
                .map(|r| r.brand.as_str())
                .collect::<BTreeSet<_>>()
                .len();
            obs.on_success(
                ctx,
                LoadStats {
                    accepted: report.accepted(),
                    rejected: report.rejected,
                    brands,
                },
            );
        }
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e {
        LoadError::Io(_) => LoadSeverity::Critical,
        LoadError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        LoadError::SchemaMismatch { .. } => LoadSeverity::Error,
        LoadError::NoValidRows { .. } => LoadSeverity::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadOptions, load_from_rows};
    use crate::error::LoadError;
    use crate::types::RawRow;

    fn row(price: &str, year: &str, brand: &str) -> RawRow {
        [
            ("price", price),
            ("year", year),
            ("brand", brand),
            ("model", "m"),
            ("title_status", "clean vehicle"),
            ("mileage", "10"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn counts_accepted_and_rejected_rows() {
        let rows = vec![
            row("100", "2020", "kia"),
            row("-1", "2020", "kia"),
            row("200", "1899", "kia"),
            row("300", "2019", "ford"),
        ];
        let report = load_from_rows(rows, &LoadOptions::default()).unwrap();
        assert_eq!(report.accepted(), 2);
        assert_eq!(report.rejected, 2);
        assert_eq!(report.records[0].price, 100);
        assert_eq!(report.records[1].brand, "ford");
    }

    #[test]
    fn all_rows_rejected_is_fatal() {
        let rows = vec![row("x", "2020", "kia"), row("1", "2020", "")];
        match load_from_rows(rows, &LoadOptions::default()) {
            Err(LoadError::NoValidRows { rejected }) => assert_eq!(rejected, 2),
            other => panic!("expected NoValidRows, got {other:?}"),
        }
    }

    #[test]
    fn no_rows_is_fatal() {
        let err = load_from_rows(Vec::new(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::NoValidRows { rejected: 0 }));
    }
}
