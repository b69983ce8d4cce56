use super::io::{load_df, save_df};
use super::projection::project;
use super::schema::{BreweryRecord, PROJECTED_COLUMNS, records};
use super::summary::{
    CountrySummary, DatasetInfo, DatasetShape, country_counts, dataset_info, exclude_country,
};
use super::validation::validate_coordinates;
use crate::config::CleanConfig;
use crate::error::Result;
use crate::integrity::receipt::{RowCounts, create_receipt, remove_receipt, save_receipt};
use crate::integrity::verifier::{VerificationResult, verify_output};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Inspection of the projected table, shared by the full run and the
/// summary-only command.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub input: PathBuf,
    pub raw: DatasetInfo,
    pub projected: DatasetInfo,
    pub preview: Vec<BreweryRecord>,
    pub countries: CountrySummary,
    pub excluded_country: String,
    pub excluded_shape: DatasetShape,
    pub excluded_countries: CountrySummary,
}

/// Everything a cleaning run produced besides the files themselves.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub summary: SummaryReport,
    pub output: PathBuf,
    pub snapshot: Option<PathBuf>,
    pub rows_before_validation: usize,
    pub rows_removed: usize,
    pub rows_written: usize,
    pub verification: VerificationResult,
    pub receipt: Option<PathBuf>,
}

fn inspect(input: &Path, config: &CleanConfig) -> Result<(DataFrame, SummaryReport)> {
    let raw = load_df(input)?;
    let raw_info = dataset_info(&raw);

    let projected = project(&raw)?;
    let preview = records(&projected.head(Some(config.preview_rows)))?;
    let countries = country_counts(&projected)?;

    let excluded = exclude_country(&projected, &config.exclude_country)?;
    let excluded_countries = country_counts(&excluded)?;

    let report = SummaryReport {
        input: input.to_path_buf(),
        raw: raw_info,
        projected: dataset_info(&projected),
        preview,
        countries,
        excluded_country: config.exclude_country.clone(),
        excluded_shape: DatasetShape::of(&excluded),
        excluded_countries,
    };
    Ok((projected, report))
}

/// Loads and projects the input, then computes the diagnostic summaries.
/// Writes nothing.
///
/// # Errors
///
/// Fails if the input cannot be loaded or lacks a required column.
pub fn summarize(config: &CleanConfig) -> Result<SummaryReport> {
    config.validate()?;
    inspect(&config.input, config).map(|(_, report)| report)
}

/// Runs the full cleaning routine described by `config`:
/// load, project, summarize, snapshot, validate, write, verify, receipt.
///
/// The output path is written exactly once, after validation.
///
/// # Errors
///
/// Fails on invalid configuration, an unreadable or malformed input, a
/// missing required column, or any write failure. A failed verification is
/// not an error; check [`PipelineReport::verification`].
pub fn run_pipeline(config: &CleanConfig) -> Result<PipelineReport> {
    config.validate()?;
    log::info!(
        "Cleaning {} -> {}",
        config.input.display(),
        config.output.display()
    );

    let (projected, summary) = inspect(&config.input, config)?;

    if let Some(snapshot) = &config.snapshot {
        let mut unvalidated = projected.clone();
        save_df(&mut unvalidated, snapshot)?;
    }

    let outcome = validate_coordinates(&projected, &config.bounds)?;
    let rows_before_validation = outcome.rows_before;
    let rows_removed = outcome.rows_removed();
    let mut cleaned = outcome.table;
    save_df(&mut cleaned, &config.output)?;

    let verification = verify_output(&config.output, Some(cleaned.height()), &config.bounds)?;

    let receipt = if config.write_receipt {
        let rows = RowCounts {
            loaded: summary.raw.shape.rows,
            written: cleaned.height(),
            removed: rows_removed,
        };
        let columns = PROJECTED_COLUMNS.iter().map(|c| (*c).to_owned()).collect();
        let receipt = create_receipt(&config.input, &config.output, rows, columns)?;
        Some(save_receipt(&receipt, &config.output)?)
    } else {
        // A receipt from an earlier run no longer describes the new output.
        remove_receipt(&config.output)?;
        None
    };

    Ok(PipelineReport {
        summary,
        output: config.output.clone(),
        snapshot: config.snapshot.clone(),
        rows_before_validation,
        rows_removed,
        rows_written: cleaned.height(),
        verification,
        receipt,
    })
}
