use super::raw_breweries;
use crate::breweries::flows::{run_pipeline, summarize};
use crate::breweries::io::{load_df, save_df};
use crate::breweries::schema::PROJECTED_COLUMNS;
use crate::config::CleanConfig;
use crate::integrity::receipt::{load_receipt, receipt_path_for};
use crate::integrity::verifier::verify_with_receipt;
use anyhow::Result;
use std::path::Path;

fn config_in(dir: &Path) -> Result<CleanConfig> {
    let input = dir.join("raw data").join("breweries.csv");
    std::fs::create_dir_all(dir.join("raw data"))?;
    save_df(&mut raw_breweries(), &input)?;

    Ok(CleanConfig {
        input,
        output: dir.join("cleaned data").join("breweries_cleaned_all.csv"),
        snapshot: Some(dir.join("cleaned data").join("breweries_projected.csv")),
        ..CleanConfig::default()
    })
}

#[test]
fn test_pipeline_writes_validated_output_once() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_in(dir.path())?;

    let report = run_pipeline(&config)?;

    assert_eq!(report.rows_before_validation, 9);
    assert_eq!(report.rows_removed, 3);
    assert_eq!(report.rows_written, 6);
    assert!(report.verification.passed, "{}", report.verification.format_cli());

    let written = load_df(&config.output)?;
    assert_eq!(written.height(), report.rows_before_validation - report.rows_removed);
    let header: Vec<&str> = written
        .get_column_names()
        .into_iter()
        .map(|n| n.as_str())
        .collect();
    assert_eq!(header, PROJECTED_COLUMNS);
    Ok(())
}

#[test]
fn test_snapshot_keeps_unvalidated_rows_separately() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_in(dir.path())?;

    let report = run_pipeline(&config)?;

    let snapshot = report.snapshot.expect("snapshot configured");
    assert_ne!(snapshot, report.output);
    assert_eq!(load_df(&snapshot)?.height(), 9);
    assert_eq!(load_df(&report.output)?.height(), 6);
    Ok(())
}

#[test]
fn test_pipeline_receipt_matches_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_in(dir.path())?;

    let report = run_pipeline(&config)?;

    let receipt_path = report.receipt.expect("receipt enabled by default");
    assert_eq!(receipt_path, receipt_path_for(&config.output));
    let receipt = load_receipt(&receipt_path)?;
    assert_eq!(receipt.rows.loaded, 9);
    assert_eq!(receipt.rows.written, 6);
    assert_eq!(receipt.rows.removed, 3);
    assert_eq!(receipt.integrity.hash, report.verification.hash);
    Ok(())
}

#[test]
fn test_pipeline_without_snapshot_or_receipt() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = CleanConfig {
        snapshot: None,
        write_receipt: false,
        ..config_in(dir.path())?
    };

    let report = run_pipeline(&config)?;

    assert!(report.receipt.is_none());
    assert!(!receipt_path_for(&config.output).exists());
    assert!(!dir.path().join("cleaned data").join("breweries_projected.csv").exists());
    Ok(())
}

#[test]
fn test_run_without_receipt_drops_stale_one() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_in(dir.path())?;
    run_pipeline(&config)?;
    assert!(receipt_path_for(&config.output).exists());

    let mut smaller = raw_breweries().head(Some(4));
    save_df(&mut smaller, &config.input)?;
    let config = CleanConfig {
        write_receipt: false,
        ..config
    };
    let report = run_pipeline(&config)?;

    assert!(report.verification.passed);
    assert!(!receipt_path_for(&config.output).exists());
    let (result, receipt) = verify_with_receipt(&config.output, None, &config.bounds)?;
    assert!(receipt.is_none());
    assert!(result.passed, "{}", result.format_cli());
    Ok(())
}

#[test]
fn test_malformed_coordinate_past_first_rows_is_dropped() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("breweries.csv");
    let mut csv =
        String::from("id,name,brewery_type,city,state_province,country,latitude,longitude\n");
    for i in 0..10_050 {
        let latitude = if i == 10_020 { "oops" } else { "53.35" };
        csv.push_str(&format!(
            "b{i},Brewery {i},micro,Dublin,Leinster,Ireland,{latitude},-6.26\n"
        ));
    }
    std::fs::write(&input, csv)?;

    let config = CleanConfig {
        input,
        output: dir.path().join("out.csv"),
        snapshot: None,
        write_receipt: false,
        ..CleanConfig::default()
    };
    let report = run_pipeline(&config)?;

    assert_eq!(report.rows_before_validation, 10_050);
    assert_eq!(report.rows_removed, 1);
    assert_eq!(report.rows_written, 10_049);
    assert!(report.verification.passed, "{}", report.verification.format_cli());
    Ok(())
}

#[test]
fn test_pipeline_overwrites_previous_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_in(dir.path())?;

    run_pipeline(&config)?;
    let report = run_pipeline(&config)?;

    assert!(report.verification.passed);
    assert_eq!(load_df(&config.output)?.height(), 6);
    Ok(())
}

#[test]
fn test_summary_reports_shapes_and_preview() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_in(dir.path())?;

    let summary = summarize(&config)?;

    assert_eq!(summary.raw.shape.columns, 10);
    assert_eq!(summary.projected.shape.columns, 8);
    assert_eq!(summary.preview.len(), 5);
    assert_eq!(summary.preview[0].name.as_deref(), Some("Lost Coast"));
    assert_eq!(summary.countries.count_for("United States"), 3);
    assert_eq!(summary.excluded_shape.rows, 6);
    assert_eq!(summary.excluded_countries.count_for("United States"), 0);
    assert!(!config.output.exists(), "summary must not write output");
    Ok(())
}

#[test]
fn test_missing_input_fails_before_writing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = CleanConfig {
        input: dir.path().join("absent.csv"),
        output: dir.path().join("out.csv"),
        snapshot: None,
        ..CleanConfig::default()
    };

    assert!(run_pipeline(&config).is_err());
    assert!(!config.output.exists());
    Ok(())
}
