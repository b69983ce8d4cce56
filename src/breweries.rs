//! # Brewery export cleaning
//!
//! The cleaning routine is an explicit sequence of functions, each taking a
//! table and returning a new one:
//!
//! ```text
//! load_df ─> project ─┬─> country_counts / exclude_country   (diagnostics only)
//!                     │
//!                     ├─> save_df(snapshot)                  (optional)
//!                     │
//!                     └─> validate_coordinates ─> save_df(output) ─> verify_output
//! ```
//!
//! [`flows::run_pipeline`] wires the stages together and returns a
//! [`flows::PipelineReport`] with every diagnostic the run produced.
//!
//! ```no_run
//! use brewclean::breweries::flows::run_pipeline;
//! use brewclean::config::CleanConfig;
//!
//! # fn example() -> brewclean::error::Result<()> {
//! let report = run_pipeline(&CleanConfig::default())?;
//! println!("Rows removed: {}", report.rows_removed);
//! # Ok(())
//! # }
//! ```

pub mod flows;
pub mod io;
pub mod projection;
pub mod schema;
pub mod summary;
pub mod validation;

pub use flows::{PipelineReport, SummaryReport, run_pipeline, summarize};
pub use io::{load_df, save_df};
pub use projection::{normalize_header, project};
pub use schema::{BreweryRecord, PROJECTED_COLUMNS, records};
pub use summary::{
    ColumnInfo, CountryCount, CountrySummary, DatasetInfo, DatasetShape, country_counts,
    dataset_info, exclude_country,
};
pub use validation::{
    CoordinateBounds, CoordinateExtent, ValidationOutcome, coordinate_extent,
    validate_coordinates,
};
