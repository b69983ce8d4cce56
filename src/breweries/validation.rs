//! Geographic validity filter.
//!
//! Rows are kept only when both coordinates fall inside the closed bounds.
//! Nothing is repaired: swapped pairs, out-of-range magnitudes and missing
//! values are all dropped outright.

use super::schema::{LATITUDE, LONGITUDE};
use crate::error::{CleanError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Closed latitude/longitude interval a record must fall inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Default for CoordinateBounds {
    fn default() -> Self {
        Self {
            min_latitude: -90.0,
            max_latitude: 90.0,
            min_longitude: -180.0,
            max_longitude: 180.0,
        }
    }
}

impl CoordinateBounds {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }

    /// # Errors
    ///
    /// Returns [`CleanError::Config`] if a bound is not finite or a minimum
    /// exceeds its maximum.
    pub fn check(&self) -> Result<()> {
        let all = [
            self.min_latitude,
            self.max_latitude,
            self.min_longitude,
            self.max_longitude,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(CleanError::Config(
                "coordinate bounds must be finite".to_owned(),
            ));
        }
        if self.min_latitude > self.max_latitude || self.min_longitude > self.max_longitude {
            return Err(CleanError::Config(format!(
                "inverted coordinate bounds: latitude [{}, {}], longitude [{}, {}]",
                self.min_latitude, self.max_latitude, self.min_longitude, self.max_longitude
            )));
        }
        Ok(())
    }

    /// Row predicate for [`validate_coordinates`]. Null coordinates evaluate
    /// to null and are filtered out.
    pub fn predicate(&self) -> Expr {
        let latitude = col(LATITUDE).cast(DataType::Float64);
        let longitude = col(LONGITUDE).cast(DataType::Float64);

        latitude
            .clone()
            .gt_eq(lit(self.min_latitude))
            .and(latitude.lt_eq(lit(self.max_latitude)))
            .and(longitude.clone().gt_eq(lit(self.min_longitude)))
            .and(longitude.lt_eq(lit(self.max_longitude)))
    }
}

/// Table that survived validation plus the before/after row counts.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub table: DataFrame,
    pub rows_before: usize,
    pub rows_after: usize,
}

impl ValidationOutcome {
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Keeps the rows whose latitude and longitude lie within `bounds`.
///
/// Running this on its own output removes nothing further.
///
/// # Errors
///
/// Returns an error if either coordinate column is missing.
pub fn validate_coordinates(df: &DataFrame, bounds: &CoordinateBounds) -> Result<ValidationOutcome> {
    let rows_before = df.height();
    let table = df.clone().lazy().filter(bounds.predicate()).collect()?;
    let rows_after = table.height();

    log::info!(
        "Coordinate validation removed {} of {rows_before} rows",
        rows_before - rows_after
    );

    Ok(ValidationOutcome {
        table,
        rows_before,
        rows_after,
    })
}

/// Observed min/max of each coordinate column; `None` when the column has
/// no values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateExtent {
    pub min_latitude: Option<f64>,
    pub max_latitude: Option<f64>,
    pub min_longitude: Option<f64>,
    pub max_longitude: Option<f64>,
}

/// # Errors
///
/// Returns an error if either coordinate column is missing or not numeric.
pub fn coordinate_extent(df: &DataFrame) -> Result<CoordinateExtent> {
    let latitude = df
        .column(LATITUDE)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let longitude = df
        .column(LONGITUDE)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let (latitude, longitude) = (latitude.f64()?, longitude.f64()?);

    Ok(CoordinateExtent {
        min_latitude: latitude.min(),
        max_latitude: latitude.max(),
        min_longitude: longitude.min(),
        max_longitude: longitude.max(),
    })
}
