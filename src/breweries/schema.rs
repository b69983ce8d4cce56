//! Column layout of the cleaned brewery table and its typed row view.

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const BREWERY_TYPE: &str = "brewery_type";
pub const CITY: &str = "city";
pub const STATE_PROVINCE: &str = "state_province";
pub const COUNTRY: &str = "country";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// Columns retained by the projection, in output order.
pub const PROJECTED_COLUMNS: [&str; 8] = [
    ID,
    NAME,
    BREWERY_TYPE,
    CITY,
    STATE_PROVINCE,
    COUNTRY,
    LATITUDE,
    LONGITUDE,
];

/// One row of the projected table.
///
/// Identifiers arrive as integers in some exports and strings in others, so
/// `id` is always carried as text here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreweryRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub brewery_type: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn text_column(df: &DataFrame, name: &str) -> Result<StringChunked> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series.str()?.clone())
}

fn float_column(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.clone())
}

/// Materializes a projected table into typed records, preserving row order.
///
/// # Errors
///
/// Returns an error if any of the [`PROJECTED_COLUMNS`] is absent.
pub fn records(df: &DataFrame) -> Result<Vec<BreweryRecord>> {
    let ids = text_column(df, ID)?;
    let names = text_column(df, NAME)?;
    let types = text_column(df, BREWERY_TYPE)?;
    let cities = text_column(df, CITY)?;
    let states = text_column(df, STATE_PROVINCE)?;
    let countries = text_column(df, COUNTRY)?;
    let latitudes = float_column(df, LATITUDE)?;
    let longitudes = float_column(df, LONGITUDE)?;

    let owned = |v: Option<&str>| v.map(str::to_owned);

    Ok((0..df.height())
        .map(|idx| BreweryRecord {
            id: owned(ids.get(idx)),
            name: owned(names.get(idx)),
            brewery_type: owned(types.get(idx)),
            city: owned(cities.get(idx)),
            state_province: owned(states.get(idx)),
            country: owned(countries.get(idx)),
            latitude: latitudes.get(idx),
            longitude: longitudes.get(idx),
        })
        .collect())
}
