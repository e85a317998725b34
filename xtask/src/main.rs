use std::path::Path;
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};

const CORE_CRATE: &str = "rideshare_core";
const CLI_CRATE: &str = "rideshare_cli";
const BENCH_NAME: &str = "dispatch";
const FIXTURE_DIR: &str = "crates/rideshare_core/tests/fixtures/test_data";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the ride-share ledger workspace",
    long_about = "A unified CLI for running the ledger against a dataset, benchmarks,\n\
                  and CI checks in the ride-share workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dataset summary for a data directory
    Run {
        /// Directory holding drivers.csv, passengers.csv and trips.csv
        #[arg(long, default_value = FIXTURE_DIR)]
        data_dir: String,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Run CI checks (fmt, clippy, tests, smoke run, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run the CLI against the fixture dataset
    Smoke,
    /// Run benchmarks
    Bench,
    /// Run check + smoke + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

/// Run cargo with `args`, exiting with its status code on failure.
fn run_cargo(args: &[&str]) {
    eprintln!("+ cargo {}", args.join(" "));
    match Command::new("cargo").args(args).status() {
        Ok(status) if status.success() => {}
        Ok(status) => exit(status.code().unwrap_or(1)),
        Err(err) => {
            eprintln!("failed to execute cargo: {err}");
            exit(1);
        }
    }
}

fn run_cli(data_dir: &str, command: &[&str]) {
    let mut args = vec!["run", "-p", CLI_CRATE, "--", "--data-dir", data_dir];
    args.extend_from_slice(command);
    run_cargo(&args);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test rideshare_core");
    run_cargo(&["test", "-p", CORE_CRATE]);

    step("Test rideshare_cli");
    run_cargo(&["test", "-p", CLI_CRATE]);
}

fn ci_smoke() {
    if !Path::new(FIXTURE_DIR).exists() {
        eprintln!("fixture dataset missing at {FIXTURE_DIR}; run from the workspace root");
        exit(1);
    }

    step("Summarize fixture dataset");
    run_cli(FIXTURE_DIR, &["summary"]);

    step("Dispatch a trip against the fixture dataset");
    run_cli(FIXTURE_DIR, &["request", "1"]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", CORE_CRATE, "--bench", BENCH_NAME]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { data_dir } => {
            run_cli(&data_dir, &["summary"]);
        }
        Commands::Bench => ci_bench(),
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Smoke => ci_smoke(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_smoke();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
