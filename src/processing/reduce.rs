//! Aggregate statistics and result views over record sequences.

use serde::Serialize;

use crate::processing::filter::filter;
use crate::processing::group::BrandIndex;
use crate::types::Record;

/// Price statistics over a non-empty record sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceStats {
    pub min: u64,
    pub max: u64,
    /// Arithmetic mean.
    pub average: f64,
}

/// Aggregates over a record sequence.
///
/// `price` and `years` are `None` exactly when `count == 0` ("no data").
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub price: Option<PriceStats>,
    /// `(oldest, newest)` model year.
    pub years: Option<(i32, i32)>,
}

impl Summary {
    /// Whether there was no data to aggregate.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Compute count, min/max/average price and year range.
pub fn summarize(records: &[&Record]) -> Summary {
    let Some((first, rest)) = records.split_first() else {
        return Summary {
            count: 0,
            price: None,
            years: None,
        };
    };

    let mut min = first.price;
    let mut max = first.price;
    let mut total = u128::from(first.price);
    let mut oldest = first.year;
    let mut newest = first.year;
    for r in rest {
        min = min.min(r.price);
        max = max.max(r.price);
        total += u128::from(r.price);
        oldest = oldest.min(r.year);
        newest = newest.max(r.year);
    }

    Summary {
        count: records.len(),
        price: Some(PriceStats {
            min,
            max,
            average: total as f64 / records.len() as f64,
        }),
        years: Some((oldest, newest)),
    }
}

/// Per-brand price statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandStats {
    pub brand: String,
    pub count: usize,
    pub price: PriceStats,
}

/// Statistics for every brand, over records matching `status` (all records if `None`).
///
/// Brands are in sorted order; brands with no matching records are omitted.
pub fn brand_statistics(
    records: &[Record],
    index: &BrandIndex,
    status: Option<&str>,
) -> Vec<BrandStats> {
    index
        .brands()
        .filter_map(|brand| {
            let group = index.group(records, brand);
            let group = match status {
                Some(status) => filter(&group, |r| r.has_status(status)),
                None => group,
            };
            let summary = summarize(&group);
            summary.price.map(|price| BrandStats {
                brand: brand.to_owned(),
                count: summary.count,
                price,
            })
        })
        .collect()
}

/// The first `limit` records of a ranked sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopView<'s, 'a> {
    pub shown: &'s [&'a Record],
    /// How many ranked records were not shown.
    pub remaining: usize,
}

/// Take the top `limit` records.
pub fn top_n<'s, 'a>(ranked: &'s [&'a Record], limit: usize) -> TopView<'s, 'a> {
    let shown = &ranked[..limit.min(ranked.len())];
    TopView {
        shown,
        remaining: ranked.len() - shown.len(),
    }
}
