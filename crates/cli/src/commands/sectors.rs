//! `sectors` command implementation.

use anyhow::{Context, Result};
use contracts::EngineConfig;
use tracing::info;

use super::{load_session, require_vehicle};
use crate::cli::SectorsArgs;
use crate::error::CliError;

/// Execute the `sectors` command
pub fn run_sectors(args: &SectorsArgs, config: &EngineConfig) -> Result<()> {
    let analysis = load_session(&args.csv, config)?;
    require_vehicle(&analysis, &args.hero)?;
    require_vehicle(&analysis, &args.rival)?;

    let hero_lap = analysis.lap_series(&args.hero, args.hero_lap);
    if hero_lap.is_empty() {
        return Err(CliError::empty_lap(&args.hero, args.hero_lap).into());
    }
    let rival_lap = analysis.lap_series(&args.rival, args.rival_lap);
    if rival_lap.is_empty() {
        return Err(CliError::empty_lap(&args.rival, args.rival_lap).into());
    }

    let sectors = analysis
        .analyze_sectors(hero_lap, rival_lap)
        .unwrap_or_default();
    info!(sectors = sectors.len(), "Sectors compared");

    if args.json {
        let json =
            serde_json::to_string_pretty(&sectors).context("Failed to serialize sector results")?;
        println!("{}", json);
        return Ok(());
    }

    println!(
        "{} lap {} vs {} lap {}\n",
        args.hero, args.hero_lap, args.rival, args.rival_lap
    );
    println!("  {:<6} {:>10} {:>10} {:>9}", "Sector", "Hero (s)", "Rival (s)", "Delta");
    for s in &sectors {
        println!(
            "  {:<6} {:>10.3} {:>10.3} {:>+9.3}",
            s.sector_index, s.hero_time_s, s.rival_time_s, s.delta_s
        );
    }
    if sectors.is_empty() {
        println!("  (no sector has samples from both cars)");
    }

    Ok(())
}
