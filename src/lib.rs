//! # brewclean
//!
//! Cleans the Open Brewery DB export for spatial visualisation.
//!
//! The routine loads the raw CSV, keeps a fixed set of columns, reports how
//! the records spread across countries, drops rows whose coordinates are
//! geographically impossible, writes the cleaned CSV and reads it back to
//! verify it.
//!
//! ```no_run
//! use brewclean::breweries::{load_df, project, validate_coordinates, CoordinateBounds};
//! use std::path::Path;
//!
//! # fn example() -> brewclean::error::Result<()> {
//! let raw = load_df(Path::new("../raw data/breweries.csv"))?;
//! let projected = project(&raw)?;
//! let outcome = validate_coordinates(&projected, &CoordinateBounds::default())?;
//! println!("Rows removed: {}", outcome.rows_removed());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`breweries`]: loading, projection, summaries, validation and the
//!   end-to-end flow
//! - [`integrity`]: post-write verification and cleaning receipts
//! - [`config`]: run configuration and its JSON loader
//! - [`error`]: error type shared by the library
//! - [`logging`]: logger installation for the binary
//!
//! ## Coordinates
//!
//! Coordinates are parsed leniently: a value that is not a number becomes
//! missing and the row is then dropped by validation, the same as a row
//! whose latitude is outside [-90, 90] or longitude outside [-180, 180].

#![warn(clippy::all, rust_2018_idioms)]

pub mod breweries;
pub mod config;
pub mod error;
pub mod integrity;
pub mod logging;
