//! Core data model types for vehicle listings.
//!
//! Rows arrive from a tabular source as [`RawRow`]s (field name → raw string). The normalizer
//! turns each accepted row into an immutable [`Record`].

use std::collections::HashMap;

use serde::Serialize;

/// Earliest model year accepted by the normalizer.
pub const MIN_MODEL_YEAR: i32 = 1900;

/// Latest model year accepted by the normalizer, and the year vehicle age is measured from.
pub const REFERENCE_YEAR: i32 = 2025;

/// Color used when a row carries no color value.
pub const UNKNOWN_COLOR: &str = "unknown";

/// Title status a listing must carry to survive the status filter stage.
pub const CLEAN_TITLE_STATUS: &str = "clean vehicle";

/// Column names the normalizer reads.
pub mod columns {
    pub const PRICE: &str = "price";
    pub const MILEAGE: &str = "mileage";
    pub const YEAR: &str = "year";
    pub const BRAND: &str = "brand";
    pub const MODEL: &str = "model";
    pub const TITLE_STATUS: &str = "title_status";
    pub const COLOR: &str = "color";

    /// Columns that must appear in the header row of a tabular source.
    pub const REQUIRED: [&str; 6] = [PRICE, MILEAGE, YEAR, BRAND, MODEL, TITLE_STATUS];
}

/// One unparsed source row: field name → raw string value.
///
/// A field may be missing entirely (e.g. an optional column absent from the header).
pub type RawRow = HashMap<String, String>;

/// One validated vehicle listing.
///
/// Records are only ever built by [`crate::ingestion::normalize::validate_row`], which enforces:
///
/// - `MIN_MODEL_YEAR <= year <= REFERENCE_YEAR`
/// - `brand` and `model` are non-empty after trimming
/// - `brand` and `title_status` are lowercased
///
/// `price` and `mileage` are unsigned, so non-negativity holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub price: u64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub title_status: String,
    pub mileage: u64,
    pub color: String,
}

impl Record {
    /// Age in whole years relative to [`REFERENCE_YEAR`]. Zero for current-year models.
    pub fn age(&self) -> i32 {
        REFERENCE_YEAR - self.year
    }

    /// Price divided by age, or `None` when the age is not positive.
    ///
    /// This is the "price per year of age" figure shown next to each ranked record.
    pub fn price_per_year(&self) -> Option<f64> {
        let age = self.age();
        (age > 0).then(|| self.price as f64 / f64::from(age))
    }

    /// Value score used for "best value" ranking: `price / sqrt(max(1, age))`. Lower is better.
    pub fn value_score(&self) -> f64 {
        let age = self.age().max(1);
        self.price as f64 / f64::from(age).sqrt()
    }

    /// Whether this record's title status equals `status` (already normalized to lowercase).
    pub fn has_status(&self, status: &str) -> bool {
        self.title_status == status
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{Record, UNKNOWN_COLOR};

    /// Build a record directly, bypassing normalization. Test-only.
    pub fn record(brand: &str, model: &str, price: u64, year: i32, mileage: u64) -> Record {
        Record {
            price,
            brand: brand.to_string(),
            model: model.to_string(),
            year,
            title_status: "clean vehicle".to_string(),
            mileage,
            color: UNKNOWN_COLOR.to_string(),
        }
    }
}
