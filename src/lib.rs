//! `car-ranking` loads used-vehicle listings from a tabular source, validates them into typed
//! [`types::Record`]s, and answers "show me the best cars of brand X" queries over them.
//!
//! The primary entrypoint is [`session::Session`], which owns the loaded records and their
//! [`processing::BrandIndex`] and runs [`session::Query`]s through the pipeline:
//!
//! raw rows → normalizer → records → brand index → filter chain → ranking → summary
//!
//! ## Loading
//!
//! [`ingestion::load_from_path`] reads a CSV file with a header row. Required columns are
//! `price`, `mileage`, `year`, `brand`, `model` and `title_status`; `color` is optional.
//! Rows that fail validation (unparsable or negative numbers, year outside 1900..=2025, blank
//! brand/model) are dropped and counted. A load that keeps no rows fails with
//! [`LoadError::NoValidRows`].
//!
//! ## Querying
//!
//! ```rust
//! use car_ranking::ingestion::LoadOptions;
//! use car_ranking::processing::RankingMethod;
//! use car_ranking::session::{Query, Session, SessionOptions};
//! use car_ranking::types::RawRow;
//!
//! let row = |price: &str, year: &str, model: &str| -> RawRow {
//!     [
//!         ("price", price),
//!         ("year", year),
//!         ("brand", "Toyota"),
//!         ("model", model),
//!         ("title_status", "clean vehicle"),
//!         ("mileage", "30000"),
//!         ("color", "Blue"),
//!     ]
//!     .iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect()
//! };
//!
//! let session = Session::from_rows(
//!     vec![row("15000", "2020", "Camry"), row("12000", "2018", "Corolla")],
//!     &LoadOptions::default(),
//!     SessionOptions::default(),
//! )?;
//!
//! let outcome = session.run_query(&Query::new("toyota", RankingMethod::Price).max_price("14000"));
//! assert_eq!(outcome.ranked.len(), 1);
//! assert_eq!(outcome.ranked[0].model, "Corolla");
//! # Ok::<(), car_ranking::LoadError>(())
//! ```
//!
//! ### Ranking methods
//!
//! - [`processing::RankingMethod::Price`]: ascending
//! - [`processing::RankingMethod::Year`]: descending (newest first)
//! - [`processing::RankingMethod::Mileage`]: ascending
//! - [`processing::RankingMethod::ValueScore`]: `price / sqrt(max(1, 2025 - year))`, always
//!   ascending
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV source, row normalizer, load observers
//! - [`processing`]: grouping, filtering, ranking, aggregates
//! - [`session`]: the session context and query execution
//! - [`types`]: records and domain constants
//! - [`error`]: error types
//! - [`cli`]: the interactive terminal front end used by the `car-ranking` binary

pub mod cli;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod session;
pub mod types;

pub use error::{LoadError, LoadResult, RejectReason};
