use thiserror::Error;

/// Convenience result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned when a dataset cannot be loaded.
///
/// Every variant is fatal for the load: the session must not proceed to selection.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error (malformed quoting, invalid UTF-8, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The source header does not contain every required column.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// Cleaning left no usable rows.
    #[error("no valid data found ({rejected} rows rejected)")]
    NoValidRows { rejected: usize },
}

/// Why the normalizer discarded a single row.
///
/// Row rejections never abort a load; they only feed the rejected-row count and observers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("field '{field}' is missing")]
    Missing { field: &'static str },

    #[error("field '{field}' is not a number (raw='{raw}')")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("field '{field}' is negative")]
    Negative { field: &'static str },

    #[error("year {year} is outside the accepted range")]
    YearOutOfRange { year: i64 },

    #[error("field '{field}' is empty")]
    EmptyField { field: &'static str },
}
