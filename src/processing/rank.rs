//! Ranking of records by a numeric key.
//!
//! The default algorithm is a three-way partition sort (a quicksort variant):
//!
//! 1. A range of length ≤ 1 is already sorted.
//! 2. The middle element of the range is the pivot.
//! 3. The range is split into *before* / *equal* / *after* the pivot key, where "before" depends
//!    on the direction (smaller keys for ascending, larger keys for descending). Each group keeps
//!    the relative order the elements had in the range.
//! 4. *before* and *after* are sorted the same way; the result is `before + equal + after`.
//!
//! Because each split keeps input order inside all three groups, elements with equal keys never
//! swap places: the sort is stable. Sub-ranges are tracked on an explicit work-list instead of
//! the call stack, so adversarial inputs (O(n²) time) cannot overflow the stack.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::Serialize;

use crate::types::Record;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Where `key` sorts relative to `other` under this direction.
    ///
    /// `Less` means "sorts earlier".
    pub fn compare(self, key: f64, other: f64) -> Ordering {
        match self {
            Self::Ascending => key.total_cmp(&other),
            Self::Descending => other.total_cmp(&key),
        }
    }
}

/// Which sorting algorithm [`rank_with`] uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortAlgorithm {
    /// Three-way partition sort. Average O(n log n), worst case O(n²).
    #[default]
    Partition,
    /// The standard library's stable merge sort. Guaranteed O(n log n).
    ///
    /// Produces the same order as [`SortAlgorithm::Partition`] for every input.
    Merge,
}

/// Ranking strategies offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RankingMethod {
    /// Cheapest first.
    Price,
    /// Newest first.
    Year,
    /// Lowest mileage first.
    Mileage,
    /// Lowest [`Record::value_score`] first.
    ValueScore,
}

impl RankingMethod {
    /// All methods, in menu order.
    pub const ALL: [Self; 4] = [Self::Price, Self::Year, Self::Mileage, Self::ValueScore];

    /// Stable identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Year => "year",
            Self::Mileage => "mileage",
            Self::ValueScore => "value",
        }
    }

    /// Menu key ("1" to "4").
    pub fn menu_key(self) -> &'static str {
        match self {
            Self::Price => "1",
            Self::Year => "2",
            Self::Mileage => "3",
            Self::ValueScore => "4",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Price => "Price (Low to High)",
            Self::Year => "Year (Newest First)",
            Self::Mileage => "Mileage (Low to High)",
            Self::ValueScore => "Best Value (Price/Year ratio)",
        }
    }

    pub fn default_direction(self) -> SortDirection {
        match self {
            Self::Year => SortDirection::Descending,
            Self::Price | Self::Mileage | Self::ValueScore => SortDirection::Ascending,
        }
    }

    /// The direction actually used when `requested` is asked for.
    ///
    /// Value score always sorts ascending (lower score is better value).
    pub fn effective_direction(self, requested: SortDirection) -> SortDirection {
        match self {
            Self::ValueScore => SortDirection::Ascending,
            _ => requested,
        }
    }

    /// The numeric key this method ranks by.
    pub fn key(self, record: &Record) -> f64 {
        match self {
            Self::Price => record.price as f64,
            Self::Year => f64::from(record.year),
            Self::Mileage => record.mileage as f64,
            Self::ValueScore => record.value_score(),
        }
    }

    /// Resolve a menu key or identifier (case-insensitive, surrounding whitespace ignored).
    pub fn from_selection(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.menu_key() == input || m.id().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for RankingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a ranking method selection is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ranking method '{0}'")]
pub struct UnknownRankingMethod(pub String);

impl FromStr for RankingMethod {
    type Err = UnknownRankingMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_selection(s).ok_or_else(|| UnknownRankingMethod(s.to_owned()))
    }
}

/// Rank records by `method` in its default direction, using the partition sort.
pub fn rank<'a>(records: &[&'a Record], method: RankingMethod) -> Vec<&'a Record> {
    rank_with(
        records,
        method,
        method.default_direction(),
        SortAlgorithm::Partition,
    )
}

/// Rank records by `method` in `direction` (see [`RankingMethod::effective_direction`]).
///
/// The output is a permutation of the input; the input slice is left untouched.
pub fn rank_with<'a>(
    records: &[&'a Record],
    method: RankingMethod,
    direction: SortDirection,
    algorithm: SortAlgorithm,
) -> Vec<&'a Record> {
    let direction = method.effective_direction(direction);
    sort_by_key(records, |r| method.key(r), direction, algorithm)
}

/// Sort copies of `items` by `key`. Stable under both algorithms.
pub fn sort_by_key<T, F>(
    items: &[T],
    key: F,
    direction: SortDirection,
    algorithm: SortAlgorithm,
) -> Vec<T>
where
    T: Copy,
    F: Fn(&T) -> f64,
{
    // Keys are computed once per element.
    let mut keyed: Vec<(f64, T)> = items.iter().map(|item| (key(item), *item)).collect();

    match algorithm {
        SortAlgorithm::Partition => partition_sort(&mut keyed, direction),
        SortAlgorithm::Merge => keyed.sort_by(|a, b| direction.compare(a.0, b.0)),
    }

    keyed.into_iter().map(|(_, item)| item).collect()
}

fn partition_sort<T: Copy>(keyed: &mut [(f64, T)], direction: SortDirection) {
    let mut pending: Vec<Range<usize>> = vec![0..keyed.len()];

    while let Some(range) = pending.pop() {
        if range.len() <= 1 {
            continue;
        }
        let (before, equal) = partition(&mut keyed[range.clone()], direction);
        pending.push(range.start..range.start + before);
        pending.push(range.start + before + equal..range.end);
    }
}

/// Stable three-way split around the middle element. Returns `(before_len, equal_len)`.
fn partition<T: Copy>(slice: &mut [(f64, T)], direction: SortDirection) -> (usize, usize) {
    let pivot = slice[slice.len() / 2].0;
    let side = |k: f64| direction.compare(k, pivot);

    let mut scratch: Vec<(f64, T)> = Vec::with_capacity(slice.len());
    scratch.extend(slice.iter().filter(|(k, _)| side(*k) == Ordering::Less));
    let before = scratch.len();
    scratch.extend(slice.iter().filter(|(k, _)| side(*k) == Ordering::Equal));
    let equal = scratch.len() - before;
    scratch.extend(slice.iter().filter(|(k, _)| side(*k) == Ordering::Greater));

    slice.copy_from_slice(&scratch);
    (before, equal)
}
