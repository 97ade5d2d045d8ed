//! Encounter simulator for the health engine.
//!
//! Loads a content directory and replays encounter scripts against it.
//! Run with: `health-sim run --content <dir> --encounter <file>`

mod commands;
mod report;
mod runner;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Run};

/// Encounter simulator for the health engine
#[derive(Parser)]
#[command(name = "health-sim")]
#[command(about = "Replay health encounters from data files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run an encounter script and print one report per action
    Run(Run),

    /// Validate a content directory
    Check(Check),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for HEALTH_CONTENT_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Check(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so reports on stdout stay machine-readable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
