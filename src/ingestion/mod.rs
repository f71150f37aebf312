//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load_from_path`] (from [`load`]) which:
//!
//! - reads a CSV file into raw string-keyed rows ([`csv`])
//! - normalizes each row into a typed [`crate::types::Record`], discarding malformed rows
//!   ([`normalize`])
//! - optionally reports rejections/success/failure/alerts to a [`LoadObserver`]

pub mod csv;
pub mod load;
pub mod normalize;
pub mod observability;

pub use load::{LoadOptions, LoadReport, load_from_path, load_from_rows};
pub use normalize::{normalize_row, validate_row};
pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, StdErrObserver,
};
