use super::raw_breweries;
use crate::breweries::projection::project;
use crate::breweries::schema::PROJECTED_COLUMNS;
use crate::error::CleanError;
use anyhow::Result;
use polars::prelude::*;

#[test]
fn test_projection_selects_fixed_columns_in_order() -> Result<()> {
    let projected = project(&raw_breweries())?;

    let names: Vec<&str> = projected
        .get_column_names()
        .into_iter()
        .map(|n| n.as_str())
        .collect();
    assert_eq!(names, PROJECTED_COLUMNS);
    assert_eq!(projected.height(), 9);
    Ok(())
}

#[test]
fn test_projection_coerces_coordinates() -> Result<()> {
    let projected = project(&raw_breweries())?;

    assert_eq!(projected.column("latitude")?.dtype(), &DataType::Float64);
    assert_eq!(projected.column("longitude")?.dtype(), &DataType::Float64);
    // "oops" becomes null rather than aborting the run
    assert_eq!(projected.column("latitude")?.null_count(), 1);
    Ok(())
}

#[test]
fn test_projection_reports_every_missing_column() {
    let df = df!(
        "id" => ["1"],
        "name" => ["Solo"],
        "city" => ["Cork"]
    )
    .expect("fixture");

    match project(&df) {
        Err(CleanError::MissingColumns(missing)) => assert_eq!(
            missing,
            vec!["brewery_type", "state_province", "country", "latitude", "longitude"]
        ),
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn test_projection_rejects_ambiguous_headers() -> Result<()> {
    let mut df = raw_breweries();
    df.with_column(Series::new("COUNTRY".into(), vec!["x"; 9]))?;

    assert!(matches!(
        project(&df),
        Err(CleanError::DuplicateColumn(name)) if name == "country"
    ));
    Ok(())
}
