//! CSV source: reads a header row plus data rows into [`RawRow`]s.

use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::{RawRow, columns};

/// Read a CSV file into raw string-keyed rows.
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain every column in [`columns::REQUIRED`] (order can differ, extra
///   columns are kept). `color` is optional.
/// - Rows may be shorter or longer than the header; trailing fields with no value are simply
///   absent from the row, and surplus values without a header are dropped.
pub fn read_csv_rows_from_path(path: impl AsRef<Path>) -> LoadResult<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    read_csv_rows_from_reader(&mut rdr)
}

/// Read raw rows from an existing CSV reader.
///
/// The reader should be built with `flexible(true)`; otherwise a single ragged row fails the
/// whole read instead of being rejected later by the normalizer.
pub fn read_csv_rows_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> LoadResult<Vec<RawRow>> {
    let headers = rdr.headers()?.clone();

    for required in columns::REQUIRED {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::SchemaMismatch {
                message: format!(
                    "missing required column '{required}'. headers={:?}",
                    headers.iter().collect::<Vec<_>>()
                ),
            });
        }
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_owned(), v.to_owned()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::read_csv_rows_from_reader;

    fn reader(input: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input.as_bytes())
    }

    #[test]
    fn short_rows_leave_trailing_fields_absent() {
        let input = "price,mileage,year,brand,model,title_status,color\n100,5,2019,kia,rio\n";
        let rows = read_csv_rows_from_reader(&mut reader(input)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("model").map(String::as_str), Some("rio"));
        assert!(rows[0].get("title_status").is_none());
        assert!(rows[0].get("color").is_none());
    }

    #[test]
    fn color_column_is_optional() {
        let input = "price,mileage,year,brand,model,title_status\n100,5,2019,kia,rio,clean vehicle\n";
        let rows = read_csv_rows_from_reader(&mut reader(input)).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
