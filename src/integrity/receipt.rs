//! Cleaning receipts: a JSON record saved next to the cleaned file.

use super::hasher::{HASH_ALGORITHM, compute_file_hash};
use crate::error::{Result, ResultExt as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bump on breaking changes to the receipt layout.
pub const RECEIPT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReceipt {
    pub receipt_version: u32,
    pub created_utc: DateTime<Utc>,
    pub producer: ProducerInfo,
    /// Raw export the run read from
    pub input_file: String,
    /// File name of the cleaned output, relative to the receipt
    pub output_file: String,
    pub rows: RowCounts,
    pub columns: Vec<String>,
    pub integrity: IntegrityInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerInfo {
    pub app_name: String,
    pub app_version: String,
    pub platform: String,
}

impl ProducerInfo {
    fn current() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_owned(),
            app_version: env!("CARGO_PKG_VERSION").to_owned(),
            platform: std::env::consts::OS.to_owned(),
        }
    }
}

/// Row accounting for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCounts {
    pub loaded: usize,
    pub written: usize,
    pub removed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityInfo {
    pub hash_algorithm: String,
    pub hash: String,
}

/// `breweries_cleaned_all.csv` -> `breweries_cleaned_all.csv.receipt.json`
pub fn receipt_path_for(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".receipt.json");
    output.with_file_name(name)
}

/// Hashes `output` and records the run's row accounting.
///
/// # Errors
///
/// Returns an error if `output` cannot be read.
pub fn create_receipt(
    input: &Path,
    output: &Path,
    rows: RowCounts,
    columns: Vec<String>,
) -> Result<CleaningReceipt> {
    let hash = compute_file_hash(output)
        .with_context(|| format!("Failed to compute hash for {}", output.display()))?;

    let output_file = output
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_owned();

    Ok(CleaningReceipt {
        receipt_version: RECEIPT_VERSION,
        created_utc: Utc::now(),
        producer: ProducerInfo::current(),
        input_file: input.display().to_string(),
        output_file,
        rows,
        columns,
        integrity: IntegrityInfo {
            hash_algorithm: HASH_ALGORITHM.to_owned(),
            hash,
        },
    })
}

/// Writes the receipt next to `output` and returns its path.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_receipt(receipt: &CleaningReceipt, output: &Path) -> Result<PathBuf> {
    let path = receipt_path_for(output);
    let json = serde_json::to_string_pretty(receipt).context("Failed to serialize receipt")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write receipt to {}", path.display()))?;
    log::debug!("Saved receipt {}", path.display());
    Ok(path)
}

/// Deletes the receipt next to `output`, if one exists. Returns whether a
/// file was removed.
///
/// # Errors
///
/// Returns an error if an existing receipt cannot be deleted.
pub fn remove_receipt(output: &Path) -> Result<bool> {
    let path = receipt_path_for(output);
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(&path)
        .with_context(|| format!("Failed to remove stale receipt {}", path.display()))?;
    log::info!("Removed stale receipt {}", path.display());
    Ok(true)
}

/// # Errors
///
/// Returns an error if the file cannot be read or is not a receipt.
pub fn load_receipt(path: &Path) -> Result<CleaningReceipt> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read receipt file: {}", path.display()))?;
    serde_json::from_str::<CleaningReceipt>(&json).context("Failed to parse receipt JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_path_appends_suffix() {
        assert_eq!(
            receipt_path_for(Path::new("../cleaned data/breweries_cleaned_all.csv")),
            PathBuf::from("../cleaned data/breweries_cleaned_all.csv.receipt.json")
        );
    }

    #[test]
    fn test_receipt_roundtrip_through_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("out.csv");
        fs::write(&output, "id,latitude,longitude\n2,45.0,-120.0\n")?;

        let rows = RowCounts {
            loaded: 2,
            written: 1,
            removed: 1,
        };
        let receipt = create_receipt(
            Path::new("raw.csv"),
            &output,
            rows,
            vec!["id".to_owned(), "latitude".to_owned(), "longitude".to_owned()],
        )?;
        assert_eq!(receipt.producer.app_name, "brewclean");
        assert_eq!(receipt.output_file, "out.csv");
        assert_eq!(receipt.integrity.hash.len(), 64);

        let saved = save_receipt(&receipt, &output)?;
        assert_eq!(load_receipt(&saved)?, receipt);
        Ok(())
    }

    #[test]
    fn test_remove_receipt_only_when_present() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("out.csv");
        assert!(!remove_receipt(&output)?);

        fs::write(receipt_path_for(&output), "{}")?;
        assert!(remove_receipt(&output)?);
        assert!(!receipt_path_for(&output).exists());
        Ok(())
    }
}
