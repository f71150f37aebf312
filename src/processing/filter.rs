//! Record filtering.
//!
//! A [`FilterChain`] applies up to three stages as a logical AND, always in this order:
//!
//! 1. title status equals a required value (normally `"clean vehicle"`)
//! 2. `price <= max_price`
//! 3. `year >= min_year`
//!
//! Every stage returns a new vector (the input is never mutated), keeps the relative order of
//! surviving records, and reports how many records remain. A stage whose threshold is absent is a
//! no-op. A stage whose threshold could not be parsed is also a no-op, but is reported as
//! [`StageOutcome::Ignored`] so the caller can tell the user.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::types::Record;

/// Returns a new vector containing only records for which `predicate` returns `true`.
pub fn filter<'a, F>(records: &[&'a Record], mut predicate: F) -> Vec<&'a Record>
where
    F: FnMut(&Record) -> bool,
{
    records.iter().copied().filter(|r| predicate(*r)).collect()
}

/// An optional, user-supplied threshold.
#[derive(Debug, Clone, PartialEq)]
pub enum Threshold<T> {
    /// No threshold given; the stage is a no-op.
    Absent,
    /// A parsed threshold.
    Value(T),
    /// Input that could not be parsed; the stage is skipped and reported as ignored.
    Invalid(String),
}

impl<T> Default for Threshold<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T: FromStr> Threshold<T> {
    /// Parse raw user input. Blank input means [`Threshold::Absent`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Absent;
        }
        match trimmed.parse::<T>() {
            Ok(v) => Self::Value(v),
            Err(_) => Self::Invalid(raw.to_owned()),
        }
    }
}

impl Threshold<f64> {
    /// Parse a price ceiling. `NaN` and infinities are treated as unparsable.
    pub fn parse_price(raw: &str) -> Self {
        match Self::parse(raw) {
            Self::Value(v) if !v.is_finite() => Self::Invalid(raw.to_owned()),
            other => other,
        }
    }
}

/// Identifies a filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterStage {
    Status,
    MaxPrice,
    MinYear,
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Status => "status",
            Self::MaxPrice => "max price",
            Self::MinYear => "min year",
        })
    }
}

/// What a stage did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StageOutcome {
    /// The predicate ran.
    Applied,
    /// No threshold was supplied.
    Skipped,
    /// The threshold could not be parsed, so the stage passed everything through.
    Ignored { raw: String },
}

/// Per-stage feedback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: FilterStage,
    pub outcome: StageOutcome,
    /// Records left after this stage.
    pub remaining: usize,
}

/// Keep records whose title status equals `status`. `None` makes the stage a no-op.
pub fn by_status<'a>(records: &[&'a Record], status: Option<&str>) -> (Vec<&'a Record>, StageReport) {
    match status {
        Some(status) => {
            let out = filter(records, |r| r.has_status(status));
            applied(FilterStage::Status, out)
        }
        None => passthrough(FilterStage::Status, records, StageOutcome::Skipped),
    }
}

/// Keep records with `price <= max`.
pub fn by_max_price<'a>(
    records: &[&'a Record],
    max: &Threshold<f64>,
) -> (Vec<&'a Record>, StageReport) {
    match max {
        Threshold::Value(max) => {
            let out = filter(records, |r| r.price as f64 <= *max);
            applied(FilterStage::MaxPrice, out)
        }
        Threshold::Absent => passthrough(FilterStage::MaxPrice, records, StageOutcome::Skipped),
        Threshold::Invalid(raw) => passthrough(
            FilterStage::MaxPrice,
            records,
            StageOutcome::Ignored { raw: raw.clone() },
        ),
    }
}

/// Keep records with `year >= min`.
pub fn by_min_year<'a>(
    records: &[&'a Record],
    min: &Threshold<i32>,
) -> (Vec<&'a Record>, StageReport) {
    match min {
        Threshold::Value(min) => {
            let out = filter(records, |r| r.year >= *min);
            applied(FilterStage::MinYear, out)
        }
        Threshold::Absent => passthrough(FilterStage::MinYear, records, StageOutcome::Skipped),
        Threshold::Invalid(raw) => passthrough(
            FilterStage::MinYear,
            records,
            StageOutcome::Ignored { raw: raw.clone() },
        ),
    }
}

fn applied(stage: FilterStage, out: Vec<&Record>) -> (Vec<&Record>, StageReport) {
    let report = StageReport {
        stage,
        outcome: StageOutcome::Applied,
        remaining: out.len(),
    };
    (out, report)
}

fn passthrough<'a>(
    stage: FilterStage,
    records: &[&'a Record],
    outcome: StageOutcome,
) -> (Vec<&'a Record>, StageReport) {
    let report = StageReport {
        stage,
        outcome,
        remaining: records.len(),
    };
    (records.to_vec(), report)
}

/// The full filter chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    /// Required title status (already lowercase). `None` disables the stage.
    pub status: Option<String>,
    pub max_price: Threshold<f64>,
    pub min_year: Threshold<i32>,
}

impl FilterChain {
    /// A chain with only the status stage enabled.
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
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

    /// Run every stage in order.
    pub fn apply<'a>(&self, records: &[&'a Record]) -> FilterOutcome<'a> {
        let (out, status) = by_status(records, self.status.as_deref());
        let (out, price) = by_max_price(&out, &self.max_price);
        let (out, year) = by_min_year(&out, &self.min_year);
        FilterOutcome {
            records: out,
            stages: vec![status, price, year],
        }
    }
}

/// Result of [`FilterChain::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<'a> {
    pub records: Vec<&'a Record>,
    /// One report per stage, in execution order.
    pub stages: Vec<StageReport>,
}

impl FilterOutcome<'_> {
    /// Stages whose threshold was unparsable.
    pub fn ignored(&self) -> impl Iterator<Item = &StageReport> {
        self.stages
            .iter()
            .filter(|s| matches!(s.outcome, StageOutcome::Ignored { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_support::record;

    fn fleet() -> Vec<Record> {
        let mut salvage = record("ford", "fusion", 3_000, 2012, 150_000);
        salvage.title_status = "salvage insurance".to_string();
        vec![
            record("ford", "focus", 9_000, 2016, 80_000),
            salvage,
            record("ford", "f-150", 30_000, 2020, 20_000),
            record("ford", "escape", 14_000, 2018, 50_000),
        ]
    }

    fn models(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.model.clone()).collect()
    }

    #[test]
    fn threshold_parse_handles_blank_valid_and_invalid() {
        assert_eq!(Threshold::<i32>::parse("   "), Threshold::Absent);
        assert_eq!(Threshold::<i32>::parse(" 2018 "), Threshold::Value(2018));
        assert_eq!(
            Threshold::<i32>::parse("soon"),
            Threshold::Invalid("soon".to_string())
        );
        assert_eq!(Threshold::parse_price("15000.5"), Threshold::Value(15_000.5));
        assert_eq!(
            Threshold::parse_price("NaN"),
            Threshold::Invalid("NaN".to_string())
        );
    }

    #[test]
    fn infinite_price_ceiling_is_ignored() {
        for raw in ["inf", "-infinity", "1e400"] {
            assert_eq!(Threshold::parse_price(raw), Threshold::Invalid(raw.to_string()));
        }

        let data = fleet();
        let refs: Vec<&Record> = data.iter().collect();
        let (out, report) = by_max_price(&refs, &Threshold::parse_price("inf"));
        assert_eq!(out.len(), refs.len());
        assert_eq!(
            report.outcome,
            StageOutcome::Ignored {
                raw: "inf".to_string()
            }
        );
    }

    #[test]
    fn chain_applies_stages_in_order_and_reports_counts() {
        let data = fleet();
        let refs: Vec<&Record> = data.iter().collect();
        let chain = FilterChain::with_status("clean vehicle")
            .max_price("20000")
            .min_year("2017");

        let out = chain.apply(&refs);
        assert_eq!(models(&out.records), vec!["escape"]);
        let remaining: Vec<usize> = out.stages.iter().map(|s| s.remaining).collect();
        assert_eq!(remaining, vec![3, 2, 1]);
        assert!(out.stages.iter().all(|s| s.outcome == StageOutcome::Applied));
        // Input untouched.
        assert_eq!(refs.len(), 4);
    }

    #[test]
    fn invalid_threshold_is_reported_as_ignored() {
        let data = fleet();
        let refs: Vec<&Record> = data.iter().collect();
        let chain = FilterChain::with_status("clean vehicle").max_price("cheap");

        let out = chain.apply(&refs);
        assert_eq!(models(&out.records), vec!["focus", "f-150", "escape"]);
        assert_eq!(
            out.stages[1],
            StageReport {
                stage: FilterStage::MaxPrice,
                outcome: StageOutcome::Ignored {
                    raw: "cheap".to_string()
                },
                remaining: 3,
            }
        );
        assert_eq!(out.stages[2].outcome, StageOutcome::Skipped);
        assert_eq!(out.ignored().count(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let data = fleet();
        let refs: Vec<&Record> = data.iter().collect();
        let chain = FilterChain::with_status("clean vehicle")
            .max_price("20000")
            .min_year("2010");

        let once = chain.apply(&refs).records;
        let twice = chain.apply(&once).records;
        assert_eq!(once, twice);
    }

    #[test]
    fn price_ceiling_is_inclusive() {
        let data = fleet();
        let refs: Vec<&Record> = data.iter().collect();
        let (out, _) = by_max_price(&refs, &Threshold::Value(9_000.0));
        assert_eq!(models(&out), vec!["focus", "fusion"]);
    }

    #[test]
    fn disabled_status_stage_passes_everything() {
        let data = fleet();
        let refs: Vec<&Record> = data.iter().collect();
        let out = FilterChain::default().apply(&refs);
        assert_eq!(out.records.len(), 4);
        assert_eq!(out.stages[0].outcome, StageOutcome::Skipped);
    }
}
