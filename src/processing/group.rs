//! Grouping of records by normalized brand.

use std::collections::BTreeMap;

use crate::types::Record;

/// Brand → positions of that brand's records in the flat record collection.
///
/// Positions refer to the slice the index was built from; every record appears in exactly one
/// group, and source order is preserved within a group. Brands iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandIndex {
    groups: BTreeMap<String, Vec<usize>>,
}

impl BrandIndex {
    /// Build the index over `records`. Rebuilding from the same slice yields an equal index.
    pub fn build(records: &[Record]) -> Self {
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, record) in records.iter().enumerate() {
            groups.entry(record.brand.clone()).or_default().push(idx);
        }
        Self { groups }
    }

    /// Records of `brand`, in source order. Unknown brands yield an empty vector.
    ///
    /// `records` must be the slice this index was built from. The lookup key is trimmed and
    /// lowercased the same way the normalizer treats brands.
    pub fn group<'a>(&self, records: &'a [Record], brand: &str) -> Vec<&'a Record> {
        self.groups
            .get(&normalize_brand(brand))
            .map(|idxs| idxs.iter().filter_map(|&i| records.get(i)).collect())
            .unwrap_or_default()
    }

    /// Number of records for `brand` (zero if unknown).
    pub fn count(&self, brand: &str) -> usize {
        self.groups
            .get(&normalize_brand(brand))
            .map_or(0, Vec::len)
    }

    /// Whether `brand` has at least one record.
    pub fn contains(&self, brand: &str) -> bool {
        self.groups.contains_key(&normalize_brand(brand))
    }

    /// Brands in sorted order.
    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// `(brand, count)` pairs in sorted brand order.
    pub fn brand_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.groups.iter().map(|(b, idxs)| (b.as_str(), idxs.len()))
    }

    /// Number of distinct brands.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn normalize_brand(brand: &str) -> String {
    brand.trim().to_lowercase()
}
