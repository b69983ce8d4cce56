//! Post-write verification of a cleaned file.
//!
//! The written CSV is read back from disk and checked against the output
//! contract: exact header, every coordinate within bounds, and the expected
//! row count. Failed checks are reported in the result instead of raised.

use super::hasher::compute_file_hash;
use super::receipt::{CleaningReceipt, load_receipt, receipt_path_for};
use crate::breweries::io::load_df;
use crate::breweries::schema::{LATITUDE, LONGITUDE, PROJECTED_COLUMNS};
use crate::breweries::validation::{
    CoordinateBounds, CoordinateExtent, coordinate_extent, validate_coordinates,
};
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Outcome of a single named check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub message: String,
}

impl CheckResult {
    fn new(name: &'static str, passed: bool, message: String) -> Self {
        Self {
            name,
            passed,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub message: String,
    pub file_path: String,
    pub row_count: usize,
    pub checks: Vec<CheckResult>,
    pub extent: CoordinateExtent,
    pub hash: String,
}

impl VerificationResult {
    fn from_checks(
        file_path: &Path,
        row_count: usize,
        checks: Vec<CheckResult>,
        extent: CoordinateExtent,
        hash: String,
    ) -> Self {
        let failed: Vec<&str> = checks.iter().filter(|c| !c.passed).map(|c| c.name).collect();
        let passed = failed.is_empty();
        let message = if passed {
            format!("All {} checks passed", checks.len())
        } else {
            format!("Failed checks: {}", failed.join(", "))
        };

        Self {
            passed,
            message,
            file_path: file_path.display().to_string(),
            row_count,
            checks,
            extent,
            hash,
        }
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Multi-line report for terminal display.
    pub fn format_cli(&self) -> String {
        let verdict = if self.passed { "PASS" } else { "FAIL" };
        let mut lines = vec![
            format!("{verdict}: {}", self.message),
            format!("  File: {}", self.file_path),
            format!("  Rows: {}", self.row_count),
            format!("  SHA-256: {}", self.hash),
        ];
        for check in &self.checks {
            let mark = if check.passed { "ok" } else { "!!" };
            lines.push(format!("  [{mark}] {}: {}", check.name, check.message));
        }
        lines.join("\n")
    }
}

/// Re-reads `path` and checks it against the cleaned-output contract.
///
/// `expected_rows`, when given, must equal the number of data rows on disk.
///
/// # Errors
///
/// Returns an error only when the file cannot be read or parsed; contract
/// violations are reported through [`VerificationResult::passed`].
pub fn verify_output(
    path: &Path,
    expected_rows: Option<usize>,
    bounds: &CoordinateBounds,
) -> Result<VerificationResult> {
    let df = load_df(path)?;
    let mut checks = Vec::new();

    let header: Vec<&str> = df.get_column_names().into_iter().map(|c| c.as_str()).collect();
    checks.push(CheckResult::new(
        "columns",
        header == PROJECTED_COLUMNS,
        format!("header is [{}]", header.join(", ")),
    ));

    let has_coordinates = header.contains(&LATITUDE) && header.contains(&LONGITUDE);
    let extent = if has_coordinates {
        let outcome = validate_coordinates(&df, bounds)?;
        let invalid = outcome.rows_removed();
        checks.push(CheckResult::new(
            "coordinates",
            invalid == 0,
            format!("{invalid} rows with missing or out-of-range coordinates"),
        ));
        coordinate_extent(&df)?
    } else {
        checks.push(CheckResult::new(
            "coordinates",
            false,
            "latitude/longitude columns not found".to_owned(),
        ));
        CoordinateExtent::default()
    };

    if let Some(expected) = expected_rows {
        checks.push(CheckResult::new(
            "row_count",
            df.height() == expected,
            format!("{} rows on disk, {expected} expected", df.height()),
        ));
    }

    let hash = compute_file_hash(path)?;
    let result = VerificationResult::from_checks(path, df.height(), checks, extent, hash);

    if result.passed {
        log::info!("Verified {}: {}", path.display(), result.message);
    } else {
        log::warn!("Verification of {} failed: {}", path.display(), result.message);
    }
    Ok(result)
}

/// Like [`verify_output`], but also compares against the receipt saved next
/// to `path` when one exists: the receipt's written row count is used when
/// `expected_rows` is `None`, and the digest must match.
///
/// # Errors
///
/// Returns an error if the file or an existing receipt cannot be read.
pub fn verify_with_receipt(
    path: &Path,
    expected_rows: Option<usize>,
    bounds: &CoordinateBounds,
) -> Result<(VerificationResult, Option<CleaningReceipt>)> {
    let receipt_path = receipt_path_for(path);
    let receipt = if receipt_path.is_file() {
        Some(load_receipt(&receipt_path)?)
    } else {
        None
    };

    let expected_rows = expected_rows.or_else(|| receipt.as_ref().map(|r| r.rows.written));
    let result = verify_output(path, expected_rows, bounds)?;

    let Some(receipt) = receipt else {
        return Ok((result, None));
    };

    let mut checks = result.checks;
    checks.push(CheckResult::new(
        "digest",
        receipt.integrity.hash == result.hash,
        format!("receipt records {}", receipt.integrity.hash),
    ));
    let result =
        VerificationResult::from_checks(path, result.row_count, checks, result.extent, result.hash);
    Ok((result, Some(receipt)))
}
