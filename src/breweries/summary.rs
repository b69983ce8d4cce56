//! Diagnostic summaries: shape, column overview and per-country counts.
//!
//! Nothing here feeds the persisted output; these values exist for the
//! console report.

use super::schema::COUNTRY;
use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

const COUNT_COLUMN: &str = "count";

/// `(rows, columns)` of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetShape {
    pub rows: usize,
    pub columns: usize,
}

impl DatasetShape {
    /// Shape of `df`.
    pub fn of(df: &DataFrame) -> Self {
        let (rows, columns) = df.shape();
        Self { rows, columns }
    }
}

impl fmt::Display for DatasetShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.columns)
    }
}

/// Name, dtype and non-null count of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

/// Per-column overview of a table: name, inferred type and non-null count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub shape: DatasetShape,
    pub columns: Vec<ColumnInfo>,
}

/// Shape plus a [`ColumnInfo`] for every column, in column order.
pub fn dataset_info(df: &DataFrame) -> DatasetInfo {
    let columns = df
        .get_columns()
        .iter()
        .map(|c| ColumnInfo {
            name: c.name().to_string(),
            dtype: c.dtype().to_string(),
            non_null: c.len() - c.null_count(),
        })
        .collect();

    DatasetInfo {
        shape: DatasetShape::of(df),
        columns,
    }
}

/// Number of rows recorded for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: u64,
}

/// Row counts grouped by country.
///
/// `counts` is sorted by count descending, ties by country name ascending.
/// Rows without a country are part of `total_rows` but not of `counts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub total_rows: usize,
    pub counts: Vec<CountryCount>,
}

impl CountrySummary {
    /// The `n` most common countries, or all of them if there are fewer.
    pub fn top(&self, n: usize) -> &[CountryCount] {
        self.counts.get(..n.min(self.counts.len())).unwrap_or(&[])
    }

    /// Rows for `country`; 0 when it never appears.
    pub fn count_for(&self, country: &str) -> u64 {
        self.counts
            .iter()
            .find(|c| c.country == country)
            .map_or(0, |c| c.count)
    }

    /// Number of distinct non-null countries.
    pub fn distinct_countries(&self) -> usize {
        self.counts.len()
    }
}

/// Groups `df` by `country` and counts rows per group.
///
/// # Errors
///
/// Returns an error if the table has no `country` column.
pub fn country_counts(df: &DataFrame) -> Result<CountrySummary> {
    let grouped = df
        .clone()
        .lazy()
        .select([col(COUNTRY).cast(DataType::String)])
        .filter(col(COUNTRY).is_not_null())
        .group_by([col(COUNTRY)])
        .agg([len().cast(DataType::UInt64).alias(COUNT_COLUMN)])
        .collect()?;

    let names = grouped.column(COUNTRY)?.as_materialized_series().str()?;
    let counts = grouped.column(COUNT_COLUMN)?.as_materialized_series().u64()?;

    let mut counts: Vec<CountryCount> = names
        .into_iter()
        .zip(counts)
        .filter_map(|(country, count)| {
            Some(CountryCount {
                country: country?.to_owned(),
                count: count?,
            })
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country)));

    Ok(CountrySummary {
        total_rows: df.height(),
        counts,
    })
}

/// Returns the rows whose country differs from `country`. Rows with no
/// country are kept.
///
/// # Errors
///
/// Returns an error if the table has no `country` column.
pub fn exclude_country(df: &DataFrame, country: &str) -> Result<DataFrame> {
    let kept = df
        .clone()
        .lazy()
        .filter(
            col(COUNTRY)
                .cast(DataType::String)
                .neq_missing(lit(country)),
        )
        .collect()?;

    log::debug!(
        "Excluding '{country}' kept {} of {} rows",
        kept.height(),
        df.height()
    );
    Ok(kept)
}
