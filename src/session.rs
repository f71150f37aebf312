//! Explicit session context: the loaded records, their brand index, and query execution.
//!
//! A [`Session`] is built once per load and is read-only afterwards. Every query borrows from it
//! and builds fresh derived sequences.

use std::path::Path;

use serde::Serialize;

use crate::error::LoadResult;
use crate::ingestion::{LoadOptions, LoadReport, load_from_path, load_from_rows};
use crate::processing::filter::{self, StageReport, Threshold};
use crate::processing::rank::{RankingMethod, SortAlgorithm, SortDirection, rank_with};
use crate::processing::reduce::{BrandStats, Summary, TopView, brand_statistics, summarize, top_n};
use crate::processing::{BrandIndex, FilterChain};
use crate::types::{CLEAN_TITLE_STATUS, RawRow, Record};

/// Options controlling query behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Title status the status stage requires (lowercase).
    pub required_status: String,
    /// How many ranked records a result view shows.
    pub display_limit: usize,
    pub sort_algorithm: SortAlgorithm,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            required_status: CLEAN_TITLE_STATUS.to_string(),
            display_limit: 10,
            sort_algorithm: SortAlgorithm::Partition,
        }
    }
}

/// The loaded dataset plus everything derived from it at load time.
#[derive(Debug, Clone)]
pub struct Session {
    records: Vec<Record>,
    index: BrandIndex,
    rejected: usize,
    options: SessionOptions,
}

impl Session {
    /// Load a CSV file and build a session over it.
    pub fn load(
        path: impl AsRef<Path>,
        load_options: &LoadOptions,
        options: SessionOptions,
    ) -> LoadResult<Self> {
        let report = load_from_path(path, load_options)?;
        Ok(Self::from_report(report, options))
    }

    /// Build a session from rows produced by any tabular source.
    pub fn from_rows<I>(rows: I, load_options: &LoadOptions, options: SessionOptions) -> LoadResult<Self>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let report = load_from_rows(rows, load_options)?;
        Ok(Self::from_report(report, options))
    }

    pub fn from_report(report: LoadReport, options: SessionOptions) -> Self {
        let index = BrandIndex::build(&report.records);
        Self {
            records: report.records,
            index,
            rejected: report.rejected,
            options,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn index(&self) -> &BrandIndex {
        &self.index
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Every record of `brand`, in load order.
    pub fn brand_records(&self, brand: &str) -> Vec<&Record> {
        self.index.group(&self.records, brand)
    }

    /// Records of `brand` that pass the status stage, with that stage's report.
    pub fn candidates(&self, brand: &str) -> (Vec<&Record>, StageReport) {
        let group = self.brand_records(brand);
        filter::by_status(&group, Some(&self.options.required_status))
    }

    /// Per-brand statistics over records with the required status.
    pub fn brand_statistics(&self) -> Vec<BrandStats> {
        brand_statistics(
            &self.records,
            &self.index,
            Some(&self.options.required_status),
        )
    }

    /// Run a query: group lookup → filter chain → ranking → aggregates.
    ///
    /// An unknown brand, or filters that remove everything, produce an empty outcome rather than
    /// an error (see [`QueryOutcome::is_no_match`]).
    pub fn run_query(&self, query: &Query) -> QueryOutcome<'_> {
        let group = self.brand_records(&query.brand);
        let chain = FilterChain {
            status: Some(self.options.required_status.clone()),
            max_price: query.max_price.clone(),
            min_year: query.min_year.clone(),
        };
        let filtered = chain.apply(&group);

        let direction = query
            .direction
            .unwrap_or_else(|| query.method.default_direction());
        let ranked = rank_with(
            &filtered.records,
            query.method,
            direction,
            self.options.sort_algorithm,
        );
        let summary = summarize(&ranked);

        QueryOutcome {
            brand: query.brand.trim().to_lowercase(),
            method: query.method,
            stages: filtered.stages,
            ranked,
            summary,
            display_limit: self.options.display_limit,
        }
    }
}

/// A user's selection: brand, ranking method and optional thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub brand: String,
    pub method: RankingMethod,
    /// `None` uses the method's default direction.
    pub direction: Option<SortDirection>,
    pub max_price: Threshold<f64>,
    pub min_year: Threshold<i32>,
}

impl Query {
    pub fn new(brand: impl Into<String>, method: RankingMethod) -> Self {
        Self {
            brand: brand.into(),
            method,
            direction: None,
            max_price: Threshold::Absent,
            min_year: Threshold::Absent,
        }
    }

    /// Set the price ceiling from raw user input.
    pub fn max_price(mut self, raw: &str) -> Self {
        self.max_price = Threshold::parse_price(raw);
        self
    }

    /// Set the year floor from raw user input.
    pub fn min_year(mut self, raw: &str) -> Self {
        self.min_year = Threshold::parse(raw);
        self
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Result of [`Session::run_query`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome<'a> {
    /// Normalized brand key.
    pub brand: String,
    pub method: RankingMethod,
    /// Filter feedback, one entry per stage.
    pub stages: Vec<StageReport>,
    /// Every surviving record, ranked.
    pub ranked: Vec<&'a Record>,
    pub summary: Summary,
    #[serde(skip)]
    display_limit: usize,
}

impl<'a> QueryOutcome<'a> {
    /// Whether nothing survived filtering.
    pub fn is_no_match(&self) -> bool {
        self.ranked.is_empty()
    }

    /// The top records under the session's display limit.
    pub fn top(&self) -> TopView<'_, 'a> {
        top_n(&self.ranked, self.display_limit)
    }
}
