//! Header normalization and the fixed column projection.

use super::schema::{LATITUDE, LONGITUDE, PROJECTED_COLUMNS};
use crate::error::{CleanError, Result};
use polars::prelude::*;

/// Lowercases and trims a raw header label.
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalized labels of every column in `df`, in source order.
pub fn normalized_headers(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| normalize_header(name.as_str()))
        .collect()
}

/// Selects [`PROJECTED_COLUMNS`] (matched after header normalization) in
/// their fixed order and drops everything else. Latitude and longitude are
/// coerced to `Float64`; values that do not parse become null.
///
/// # Errors
///
/// - [`CleanError::MissingColumns`] listing every required column absent
///   from the source.
/// - [`CleanError::DuplicateColumn`] when two raw headers normalize to the
///   same required label.
pub fn project(df: &DataFrame) -> Result<DataFrame> {
    let mut missing = Vec::new();
    let mut columns = Vec::with_capacity(PROJECTED_COLUMNS.len());

    for wanted in PROJECTED_COLUMNS {
        let mut matches = df
            .get_columns()
            .iter()
            .filter(|c| normalize_header(c.name().as_str()) == wanted);

        match (matches.next(), matches.next()) {
            (Some(column), None) => {
                let mut column = column.clone();
                column.rename(wanted.into());
                columns.push(column);
            }
            (Some(_), Some(_)) => return Err(CleanError::DuplicateColumn(wanted.to_owned())),
            (None, _) => missing.push(wanted.to_owned()),
        }
    }

    if !missing.is_empty() {
        return Err(CleanError::MissingColumns(missing));
    }

    let dropped = df.width() - columns.len();
    let projected = DataFrame::new(columns)?;
    log::debug!("Projection kept {} columns, dropped {dropped}", projected.width());

    coerce_coordinates(projected)
}

fn coerce_coordinates(df: DataFrame) -> Result<DataFrame> {
    let nulls_before = coordinate_nulls(&df)?;

    let df = df
        .lazy()
        .with_columns([
            col(LATITUDE).cast(DataType::Float64),
            col(LONGITUDE).cast(DataType::Float64),
        ])
        .collect()?;

    let coerced = coordinate_nulls(&df)?.saturating_sub(nulls_before);
    if coerced > 0 {
        log::warn!("{coerced} coordinate values could not be parsed and were set to null");
    }
    Ok(df)
}

fn coordinate_nulls(df: &DataFrame) -> Result<usize> {
    Ok(df.column(LATITUDE)?.null_count() + df.column(LONGITUDE)?.null_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Brewery_Type "), "brewery_type");
        assert_eq!(normalize_header("LATITUDE"), "latitude");
        assert_eq!(normalize_header("id"), "id");
    }

    #[test]
    fn test_normalized_headers_keeps_source_order() -> Result<()> {
        let df = df!(" Name" => ["x"], "ID " => ["1"])?;
        assert_eq!(normalized_headers(&df), vec!["name", "id"]);
        Ok(())
    }
}
