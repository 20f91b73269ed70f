// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ticker_analyzer::{run, RunConfig, DEFAULT_OUTPUT_DIR};

/// Scores ten Brazilian real-estate funds (FIIs) against 20 quality criteria
/// and writes a dated HTML table and raw-data CSV.
#[derive(Parser, Debug)]
#[command(name = "ticker-analyzer", version, about, long_about = None)]
struct Cli {
    /// Directory receiving the HTML and CSV files
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Run date used in file names and in the report (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Print the score reports as JSON instead of the console table
    #[arg(long)]
    json: bool,

    /// Disable colors in console output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse the scored funds interactively
    Browse,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = ticker_analyzer::VERSION, "ticker-analyzer starting");

    let result = match &cli.command {
        Some(Commands::Browse) => run_ui_mode(),
        None => run_analysis(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run_analysis(cli: &Cli) -> Result<()> {
    let config = RunConfig {
        output_dir: cli.output_dir.clone(),
        date: cli.date,
        json: cli.json,
        color: !cli.no_color,
    };

    run(&config)?;
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    use anyhow::Context;
    use ticker_analyzer::{analyze, dataset};

    let reports = analyze(&dataset::funds()).context("Embedded fund data failed validation")?;

    let mut app = ui::App::new(&reports);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    anyhow::bail!("TUI mode not available: rebuild with `cargo build --features tui`")
}
