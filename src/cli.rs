use anyhow::{Context as _, Result};
use brewclean::breweries::{
    CountrySummary, DatasetInfo, PipelineReport, SummaryReport, run_pipeline, summarize,
};
use brewclean::config::{CleanConfig, load_config};
use brewclean::integrity::verify_with_receipt;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "brewclean",
    about = "Clean and validate Open Brewery DB exports",
    long_about = "Clean and validate Open Brewery DB exports.\n\nWithout a subcommand, runs the full cleaning routine with default paths."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean the raw export and write the validated CSV
    Run(RunArgs),
    /// Print dataset and country summaries without writing anything
    Summary(SourceArgs),
    /// Check an existing cleaned file against the output contract
    Verify {
        /// Cleaned CSV to verify
        file: PathBuf,

        /// Expected number of data rows. Defaults to the receipt's count, if any.
        #[arg(long)]
        expected_rows: Option<usize>,

        /// JSON configuration file (for coordinate bounds)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Raw breweries CSV
    #[arg(short, long, env = "BREWCLEAN_INPUT")]
    pub input: Option<PathBuf>,

    /// JSON configuration file; command-line flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Country left out of the secondary summary
    #[arg(long)]
    pub exclude_country: Option<String>,

    /// Number of countries to show
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Cleaned output CSV
    #[arg(short, long, env = "BREWCLEAN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Where to write the projected, unvalidated table
    #[arg(long, conflicts_with = "no_snapshot")]
    pub snapshot: Option<PathBuf>,

    /// Skip the unvalidated snapshot
    #[arg(long)]
    pub no_snapshot: bool,

    /// Do not write a receipt next to the output
    #[arg(long)]
    pub no_receipt: bool,
}

pub fn run_command(command: Option<Commands>) -> Result<()> {
    let command = match command {
        Some(command) => command,
        None => default_command()?,
    };
    match command {
        Commands::Run(args) => handle_run(args),
        Commands::Summary(args) => handle_summary(&args),
        Commands::Verify {
            file,
            expected_rows,
            config,
        } => handle_verify(&file, expected_rows, config.as_ref()),
    }
}

/// Bare `brewclean` parses as `brewclean run`, so the run flags still pick
/// up their environment variables.
fn default_command() -> Result<Commands> {
    Cli::try_parse_from(["brewclean", "run"])?
        .command
        .context("`run` did not parse as a subcommand")
}

fn base_config(path: Option<&PathBuf>) -> Result<CleanConfig> {
    match path {
        Some(path) => {
            load_config(path).with_context(|| format!("Failed to load {}", path.display()))
        }
        None => Ok(CleanConfig::default()),
    }
}

fn apply_source(config: &mut CleanConfig, args: &SourceArgs) {
    if let Some(input) = &args.input {
        config.input.clone_from(input);
    }
    if let Some(country) = &args.exclude_country {
        config.exclude_country.clone_from(country);
    }
    if let Some(top) = args.top {
        config.top_countries = top;
    }
}

fn handle_run(args: RunArgs) -> Result<()> {
    let mut config = base_config(args.source.config.as_ref())?;
    apply_source(&mut config, &args.source);
    if let Some(output) = args.output {
        config.output = output;
    }
    if args.no_snapshot {
        config.snapshot = None;
    } else if let Some(snapshot) = args.snapshot {
        config.snapshot = Some(snapshot);
    }
    if args.no_receipt {
        config.write_receipt = false;
    }

    let report = run_pipeline(&config).context("Cleaning run failed")?;
    print_pipeline(&report, config.top_countries);

    if !report.verification.passed {
        anyhow::bail!(
            "{} was written but failed verification",
            report.output.display()
        );
    }
    Ok(())
}

fn handle_summary(args: &SourceArgs) -> Result<()> {
    let mut config = base_config(args.config.as_ref())?;
    apply_source(&mut config, args);

    let summary = summarize(&config).context("Summary failed")?;
    print_summary(&summary, config.top_countries);
    Ok(())
}

fn handle_verify(file: &Path, expected_rows: Option<usize>, config: Option<&PathBuf>) -> Result<()> {
    let config = base_config(config)?;
    let (result, receipt) = verify_with_receipt(file, expected_rows, &config.bounds)
        .with_context(|| format!("Failed to verify {}", file.display()))?;

    if let Some(receipt) = receipt {
        println!(
            "Receipt: {} rows written from {} at {}",
            receipt.rows.written,
            receipt.input_file,
            receipt.created_utc.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    println!("{}", result.format_cli());

    if !result.passed {
        anyhow::bail!("{} failed verification", file.display());
    }
    Ok(())
}

fn print_info(title: &str, info: &DatasetInfo) {
    println!("{title}: {} rows x {} columns", info.shape.rows, info.shape.columns);
    for column in &info.columns {
        println!(
            "  {:<20} {:>8} non-null  {}",
            column.name, column.non_null, column.dtype
        );
    }
}

fn print_countries(title: &str, summary: &CountrySummary, top: usize) {
    println!(
        "{title} (top {} of {}):",
        top.min(summary.distinct_countries()),
        summary.distinct_countries()
    );
    for entry in summary.top(top) {
        println!("  {:<30} {:>6}", entry.country, entry.count);
    }
}

fn print_summary(summary: &SummaryReport, top: usize) {
    println!("Input: {}", summary.input.display());
    print_info("Raw dataset", &summary.raw);
    print_info("Projected dataset", &summary.projected);

    println!("First {} records:", summary.preview.len());
    for record in &summary.preview {
        println!(
            "  {} | {} | {} | {} | {}",
            record.id.as_deref().unwrap_or("-"),
            record.name.as_deref().unwrap_or("-"),
            record.brewery_type.as_deref().unwrap_or("-"),
            record.city.as_deref().unwrap_or("-"),
            record.country.as_deref().unwrap_or("-"),
        );
    }

    print_countries("Breweries per country", &summary.countries, top);
    println!(
        "Shape without {}: {} (was {})",
        summary.excluded_country, summary.excluded_shape, summary.projected.shape
    );
    print_countries(
        &format!("Breweries per country, excluding {}", summary.excluded_country),
        &summary.excluded_countries,
        top,
    );
}

fn fmt_coord(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v}"))
}

fn print_pipeline(report: &PipelineReport, top: usize) {
    print_summary(&report.summary, top);

    if let Some(snapshot) = &report.snapshot {
        println!("Unvalidated snapshot: {}", snapshot.display());
    }
    println!("Rows removed: {}", report.rows_removed);
    println!(
        "Shape after validation: ({}, {})",
        report.rows_written,
        report.summary.projected.shape.columns
    );
    println!("Output: {}", report.output.display());

    let extent = &report.verification.extent;
    println!("Max latitude: {}", fmt_coord(extent.max_latitude));
    println!("Min latitude: {}", fmt_coord(extent.min_latitude));
    println!("Max longitude: {}", fmt_coord(extent.max_longitude));
    println!("Min longitude: {}", fmt_coord(extent.min_longitude));

    println!("{}", report.verification.format_cli());
    if let Some(receipt) = &report.receipt {
        println!("Receipt: {}", receipt.display());
    }
}
