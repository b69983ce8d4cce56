//! # brewclean entry point
//!
//! ```bash
//! brewclean                      # full run with default paths
//! brewclean run --no-snapshot    # full run, final file only
//! brewclean summary --top 10     # country summaries, writes nothing
//! brewclean verify "../cleaned data/breweries_cleaned_all.csv"
//! ```
//!
//! Logging goes to stderr (`RUST_LOG` adjusts the level); the report goes to
//! stdout. Any failure exits with a non-zero status.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // The report is the program's output

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    brewclean::logging::init()?;

    let cli = cli::Cli::parse();
    cli::run_command(cli.command)
}
