//! Command implementations.

mod fastest_lap;
mod replay;
mod sectors;
mod validate;

pub use fastest_lap::run_fastest_lap;
pub use replay::run_replay;
pub use sectors::run_sectors;
pub use validate::run_validate;

use std::path::Path;

use anyhow::{Context, Result};
use contracts::EngineConfig;
use race_engine::RaceAnalysis;
use tracing::info;

use crate::error::CliError;

/// Engine configuration from `--config`, or stock parameters
pub(crate) fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    if let Some(path) = path {
        info!(config = %path.display(), "Loading engine configuration");
    }
    config_loader::ConfigLoader::load_or_default(path).with_context(|| match path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to build default config".to_string(),
    })
}

/// Load a telemetry CSV and index it
pub(crate) fn load_session(csv: &Path, config: &EngineConfig) -> Result<RaceAnalysis> {
    let (table, report) = ingestion::load_with_config(csv, &config.ingestion)
        .with_context(|| format!("Failed to load telemetry from {}", csv.display()))?;

    info!(
        samples = report.samples,
        vehicles = report.vehicles,
        ignored_rows = report.read.rows_ignored(),
        duplicates = report.pivot.duplicates,
        "Session loaded"
    );
    Ok(RaceAnalysis::with_config(table, config))
}

/// Fail with the list of known ids when `id` is not in the session
pub(crate) fn require_vehicle(analysis: &RaceAnalysis, id: &str) -> Result<(), CliError> {
    if analysis.series(id).is_some() {
        Ok(())
    } else {
        Err(CliError::unknown_vehicle(
            id,
            analysis.vehicle_ids().map(|v| v.as_str()),
        ))
    }
}
