use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rideshare_core::csv_source::CsvDirectory;
use rideshare_core::selection::SelectionPolicyKind;
use rideshare_core::{DispatchConfig, TripDispatcher};
use tracing_subscriber::EnvFilter;

mod report;

/// Dataset directory used when neither `--data-dir` nor `RIDESHARE_DATA_DIR` is given.
const DEFAULT_DATA_DIR: &str = "support";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "rideshare",
    about = "Inspect a ride-share dataset and dispatch trips",
    long_about = "Loads drivers.csv, passengers.csv and trips.csv from a directory,\n\
                  prints per-entity statistics, and dispatches new trips in memory."
)]
struct Cli {
    /// Directory holding drivers.csv, passengers.csv and trips.csv
    #[arg(long, env = "RIDESHARE_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    data_dir: PathBuf,
    /// Driver selection policy for `request`
    #[arg(long, value_enum, default_value_t = Policy::FirstAvailable, global = true)]
    policy: Policy,
    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dataset-wide counts and totals
    Summary,
    /// Statistics for one driver
    Driver { id: i64 },
    /// Statistics for one passenger
    Passenger { id: i64 },
    /// List every trip in load order
    Trips,
    /// Dispatch a new trip for a passenger and print it
    Request { passenger_id: i64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    /// First available driver in file order
    FirstAvailable,
    /// Driver idle the longest since their last trip
    LongestIdle,
}

impl From<Policy> for SelectionPolicyKind {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::FirstAvailable => SelectionPolicyKind::FirstAvailable,
            Policy::LongestIdle => SelectionPolicyKind::LongestIdle,
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(cli: &Cli) -> anyhow::Result<TripDispatcher> {
    let source = CsvDirectory::new(&cli.data_dir);
    let config = DispatchConfig::default().with_selection(cli.policy.into());
    tracing::debug!(
        data_dir = %cli.data_dir.display(),
        selection = ?config.selection,
        "loading dataset"
    );
    TripDispatcher::load_with_config(&source, config)
        .with_context(|| format!("failed to load dataset from {}", cli.data_dir.display()))
}

// ── main ───────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut dispatcher = load(&cli)?;

    let output = match cli.command {
        Commands::Summary => report::render_summary(&dispatcher.summary()),
        Commands::Driver { id } => report::render_driver(dispatcher.find_driver(id)?),
        Commands::Passenger { id } => report::render_passenger(dispatcher.find_passenger(id)?),
        Commands::Trips => report::render_trips(dispatcher.trips()),
        Commands::Request { passenger_id } => {
            let trip = dispatcher.request_trip(passenger_id).with_context(|| {
                format!("could not dispatch a trip for passenger {passenger_id}")
            })?;
            report::render_dispatched(&dispatcher, &trip)
        }
    };
    println!("{output}");
    Ok(())
}
