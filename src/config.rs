//! Run configuration.
//!
//! Defaults reproduce the historical layout of the analysis project, where
//! the tool runs from `data processed/` next to `raw data/` and
//! `cleaned data/`. A JSON file may override any subset of fields:
//!
//! ```json
//! {
//!   "input": "exports/breweries.csv",
//!   "exclude_country": "Australia",
//!   "top_countries": 10
//! }
//! ```

use crate::breweries::validation::CoordinateBounds;
use crate::error::{CleanError, Result, ResultExt as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "../raw data/breweries.csv";
pub const DEFAULT_OUTPUT: &str = "../cleaned data/breweries_cleaned_all.csv";
pub const DEFAULT_SNAPSHOT: &str = "../cleaned data/breweries_projected.csv";
pub const DEFAULT_EXCLUDED_COUNTRY: &str = "United States";
pub const DEFAULT_TOP_COUNTRIES: usize = 15;
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Raw Open Brewery DB export
    pub input: PathBuf,
    /// Authoritative cleaned file, written once after validation
    pub output: PathBuf,
    /// Pre-validation copy of the projected table; `None` skips it
    pub snapshot: Option<PathBuf>,
    /// Country left out of the secondary summary
    pub exclude_country: String,
    /// Number of countries shown in the console report
    pub top_countries: usize,
    /// Number of leading records shown in the console report
    pub preview_rows: usize,
    pub bounds: CoordinateBounds,
    /// Save `<output>.receipt.json` after a successful run
    pub write_receipt: bool,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            snapshot: Some(PathBuf::from(DEFAULT_SNAPSHOT)),
            exclude_country: DEFAULT_EXCLUDED_COUNTRY.to_owned(),
            top_countries: DEFAULT_TOP_COUNTRIES,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            bounds: CoordinateBounds::default(),
            write_receipt: true,
        }
    }
}

impl CleanConfig {
    /// # Errors
    ///
    /// Returns [`CleanError::Config`] describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.exclude_country.trim().is_empty() {
            return Err(CleanError::Config(
                "exclude_country must not be empty".to_owned(),
            ));
        }
        if self.top_countries == 0 {
            return Err(CleanError::Config(
                "top_countries must be at least 1".to_owned(),
            ));
        }
        if self.input == self.output {
            return Err(CleanError::Config(format!(
                "output {} would overwrite the raw input",
                self.output.display()
            )));
        }
        if self.snapshot.as_ref() == Some(&self.input) {
            return Err(CleanError::Config(format!(
                "snapshot {} would overwrite the raw input",
                self.input.display()
            )));
        }
        if self.snapshot.as_ref() == Some(&self.output) {
            return Err(CleanError::Config(format!(
                "snapshot and output both point at {}",
                self.output.display()
            )));
        }
        self.bounds.check()
    }
}

/// Reads a JSON configuration file; absent fields keep their defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or holds
/// invalid settings.
pub fn load_config(path: &Path) -> Result<CleanConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: CleanConfig = serde_json::from_str(&content)?;
    config.validate()?;
    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}
