//! # Race Engineer CLI
//!
//! Command line entry point.
//!
//! Provides:
//! - Session loading and fastest-lap lookup
//! - Sector comparison of two laps
//! - Headless battle replay with overtake scoring
//! - Engine configuration validation

mod cli;
mod commands;
mod error;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{load_engine_config, run_fastest_lap, run_replay, run_sectors, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Race Engineer CLI starting"
    );

    let result = run(&cli);

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

fn run(cli: &Cli) -> Result<()> {
    let config = || load_engine_config(cli.config.as_deref());
    match &cli.command {
        Commands::FastestLap(args) => run_fastest_lap(args, &config()?),
        Commands::Sectors(args) => run_sectors(args, &config()?),
        Commands::Replay(args) => run_replay(args, &config()?),
        Commands::ValidateConfig(args) => run_validate(args),
    }
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let default_log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: cli.metrics_port,
        default_log_level: default_log_level.to_string(),
    })
}
