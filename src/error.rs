//! Centralized error handling for brewclean.
//!
//! Every fallible library operation returns [`Result`], whose error type is
//! [`CleanError`]. The variants follow the failure modes of the cleaning
//! pipeline:
//!
//! ```
//! use brewclean::error::CleanError;
//!
//! fn describe(err: &CleanError) -> &'static str {
//!     match err {
//!         CleanError::InvalidPath(_) => "input file is missing",
//!         CleanError::MissingColumns(_) => "upstream schema changed",
//!         CleanError::DuplicateColumn(_) => "ambiguous headers",
//!         _ => "other failure",
//!     }
//! }
//! ```
//!
//! Conversions from `std::io::Error`, `PolarsError`, `serde_json::Error` and
//! `anyhow::Error` are provided so `?` works across crate boundaries, and
//! [`ResultExt`] adds `.context()` to any convertible result:
//!
//! ```no_run
//! use brewclean::error::ResultExt as _;
//!
//! fn read_raw() -> brewclean::error::Result<String> {
//!     std::fs::read_to_string("../raw data/breweries.csv")
//!         .context("Failed to read raw breweries export")
//! }
//! ```

use std::fmt;

/// Main error type for brewclean operations.
#[derive(Debug)]
pub enum CleanError {
    /// I/O errors (reading the export, writing cleaned files)
    Io(std::io::Error),

    /// Polars failures (CSV parsing, casting, filtering)
    DataProcessing(String),

    /// Required columns absent after header normalization
    MissingColumns(Vec<String>),

    /// Two raw headers normalize to the same label
    DuplicateColumn(String),

    /// Configuration errors
    Config(String),

    /// File not found or invalid path
    InvalidPath(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for CleanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::MissingColumns(cols) => {
                write!(f, "Missing required columns: {}", cols.join(", "))
            }
            Self::DuplicateColumn(name) => {
                write!(f, "Column '{name}' appears more than once after normalization")
            }
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CleanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CleanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for CleanError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for CleanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for CleanError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for brewclean operations.
pub type Result<T> = std::result::Result<T, CleanError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CleanError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: CleanError = e.into();
            CleanError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: CleanError = e.into();
            CleanError::Other(format!("{}: {}", f(), err))
        })
    }
}
