//! Row normalization: [`RawRow`] → validated [`Record`].
//!
//! Rules (applied in this order):
//!
//! - `price` and `mileage` parse as floats (surrounding whitespace allowed). A value absent from
//!   the row (a short row), a non-finite value or a negative value rejects the row. Accepted
//!   values are truncated toward zero.
//! - `year` parses as an integer and must fall in `MIN_MODEL_YEAR..=REFERENCE_YEAR`.
//! - `brand` is trimmed and lowercased, `model` is trimmed; both must be non-empty.
//! - `title_status` is trimmed and lowercased (may be empty).
//! - `color` is trimmed; absent or blank becomes [`UNKNOWN_COLOR`].
//!
//! Normalization is a pure function of the row.

use crate::error::RejectReason;
use crate::types::{MIN_MODEL_YEAR, REFERENCE_YEAR, RawRow, Record, UNKNOWN_COLOR, columns};

/// Normalize one row, returning `None` if it is rejected.
pub fn normalize_row(row: &RawRow) -> Option<Record> {
    validate_row(row).ok()
}

/// Normalize one row, reporting why it was rejected.
pub fn validate_row(row: &RawRow) -> Result<Record, RejectReason> {
    let price = parse_amount(row, columns::PRICE)?;
    let mileage = parse_amount(row, columns::MILEAGE)?;
    let year = parse_year(row)?;

    let brand = text(row, columns::BRAND).to_lowercase();
    if brand.is_empty() {
        return Err(RejectReason::EmptyField {
            field: columns::BRAND,
        });
    }
    let model = text(row, columns::MODEL).to_owned();
    if model.is_empty() {
        return Err(RejectReason::EmptyField {
            field: columns::MODEL,
        });
    }

    let color = match text(row, columns::COLOR) {
        "" => UNKNOWN_COLOR.to_owned(),
        c => c.to_owned(),
    };

    Ok(Record {
        price,
        brand,
        model,
        year,
        title_status: text(row, columns::TITLE_STATUS).to_lowercase(),
        mileage,
        color,
    })
}

fn text<'a>(row: &'a RawRow, field: &str) -> &'a str {
    row.get(field).map(|s| s.trim()).unwrap_or("")
}

fn parse_amount(row: &RawRow, field: &'static str) -> Result<u64, RejectReason> {
    let raw = row.get(field).ok_or(RejectReason::Missing { field })?;
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RejectReason::InvalidNumber {
            field,
            raw: raw.clone(),
        })?;
    if value < 0.0 {
        return Err(RejectReason::Negative { field });
    }
    // `as` saturates at u64::MAX for absurdly large inputs.
    Ok(value.trunc() as u64)
}

fn parse_year(row: &RawRow) -> Result<i32, RejectReason> {
    let raw = row.get(columns::YEAR).ok_or(RejectReason::Missing {
        field: columns::YEAR,
    })?;
    let year = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| RejectReason::InvalidNumber {
            field: columns::YEAR,
            raw: raw.clone(),
        })?;
    if !(i64::from(MIN_MODEL_YEAR)..=i64::from(REFERENCE_YEAR)).contains(&year) {
        return Err(RejectReason::YearOutOfRange { year });
    }
    Ok(year as i32)
}
