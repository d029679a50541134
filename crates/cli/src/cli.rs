//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Race Engineer - telemetry replay and overtake analysis
#[derive(Parser, Debug)]
#[command(
    name = "race-engineer",
    author,
    version,
    about = "Race telemetry replay and overtake analysis",
    long_about = "Loads long-format race telemetry, synchronizes two cars by track \n\
                  position and scores overtake opportunities frame by frame."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "RACE_ENGINEER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "RACE_ENGINEER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Engine configuration file (TOML or JSON); stock parameters if omitted
    #[arg(short, long, global = true, env = "RACE_ENGINEER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Expose Prometheus metrics on this port
    #[arg(long, global = true, env = "RACE_ENGINEER_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the fastest plausible lap of the session
    FastestLap(FastestLapArgs),

    /// Compare two laps sector by sector
    Sectors(SectorsArgs),

    /// Replay a battle frame by frame
    Replay(ReplayArgs),

    /// Validate an engine configuration file
    ValidateConfig(ValidateArgs),
}

/// Arguments for the `fastest-lap` command
#[derive(Parser, Debug)]
pub struct FastestLapArgs {
    /// Long-format telemetry CSV
    pub csv: PathBuf,

    /// Also list every lap with its elapsed time
    #[arg(long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `sectors` command
#[derive(Parser, Debug)]
pub struct SectorsArgs {
    /// Long-format telemetry CSV
    pub csv: PathBuf,

    /// Hero vehicle id
    #[arg(long)]
    pub hero: String,

    /// Hero lap number
    #[arg(long)]
    pub hero_lap: u32,

    /// Rival vehicle id
    #[arg(long)]
    pub rival: String,

    /// Rival lap number
    #[arg(long)]
    pub rival_lap: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `replay` command
#[derive(Parser, Debug, Clone)]
pub struct ReplayArgs {
    /// Long-format telemetry CSV
    pub csv: PathBuf,

    /// Hero vehicle id
    #[arg(long)]
    pub hero: String,

    /// Rival vehicle id (replaced by the session-best car in ghost mode)
    #[arg(long)]
    pub rival: String,

    /// Rival synchronization mode
    #[arg(long, value_enum, default_value = "live")]
    pub mode: ModeArg,

    /// Number of frames to evaluate (default: one pass over the hero series)
    #[arg(long)]
    pub frames: Option<usize>,

    /// Hero sample index to start from
    #[arg(long, default_value = "0")]
    pub start: usize,

    /// Hero samples advanced per frame (overrides the config file)
    #[arg(long)]
    pub speed: Option<usize>,

    /// Print every n-th frame
    #[arg(long, default_value = "1")]
    pub every: usize,

    /// Emit one JSON object per printed frame
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate-config` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    pub path: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Rival mode
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeArg {
    /// Chosen rival on the hero's current lap
    #[default]
    Live,
    /// Session-best lap
    Ghost,
}

impl From<ModeArg> for race_engine::RivalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Live => race_engine::RivalMode::Live,
            ModeArg::Ghost => race_engine::RivalMode::Ghost,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}
