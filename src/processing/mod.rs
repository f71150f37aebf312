//! In-memory query pipeline over loaded records.
//!
//! Each stage takes a borrowed record sequence and returns a new one; nothing here mutates the
//! loaded collection.
//!
//! - [`group`]: [`BrandIndex`], records grouped by brand
//! - [`filter`]: [`FilterChain`], status / price ceiling / year floor
//! - [`rank`]: [`RankingMethod`] keys and the stable partition sort
//! - [`reduce`]: [`Summary`] aggregates, per-brand statistics, top-N view
//!
//! ## Example: group → filter → rank → summarize
//!
//! ```rust
//! use car_ranking::ingestion::{load_from_rows, LoadOptions};
//! use car_ranking::processing::{rank, summarize, BrandIndex, FilterChain, RankingMethod};
//! use car_ranking::types::{RawRow, Record};
//!
//! let row = |price: &str, year: &str, model: &str| -> RawRow {
//!     [
//!         ("price", price),
//!         ("year", year),
//!         ("brand", "Toyota"),
//!         ("model", model),
//!         ("title_status", "clean vehicle"),
//!         ("mileage", "30000"),
//!     ]
//!     .iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect()
//! };
//! let report = load_from_rows(
//!     vec![row("15000", "2020", "Camry"), row("12000", "2018", "Corolla")],
//!     &LoadOptions::default(),
//! )
//! .unwrap();
//!
//! let index = BrandIndex::build(&report.records);
//! let toyotas = index.group(&report.records, "toyota");
//! let clean = FilterChain::with_status("clean vehicle").apply(&toyotas);
//! let ranked: Vec<&Record> = rank(&clean.records, RankingMethod::Price);
//!
//! assert_eq!(ranked[0].model, "Corolla");
//! assert_eq!(summarize(&ranked).price.unwrap().average, 13_500.0);
//! ```

pub mod filter;
pub mod group;
pub mod rank;
pub mod reduce;

pub use filter::{FilterChain, FilterOutcome, FilterStage, StageOutcome, StageReport, Threshold, filter};
pub use group::BrandIndex;
pub use rank::{RankingMethod, SortAlgorithm, SortDirection, UnknownRankingMethod, rank, rank_with};
pub use reduce::{BrandStats, PriceStats, Summary, TopView, brand_statistics, summarize, top_n};
