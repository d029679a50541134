//! `fastest-lap` command implementation.

use anyhow::{Context, Result};
use contracts::EngineConfig;
use race_engine::LapTime;
use serde::Serialize;

use super::load_session;
use crate::cli::FastestLapArgs;

#[derive(Serialize)]
struct FastestLapReport {
    fastest: Option<LapTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    laps: Option<Vec<LapTime>>,
}

/// Execute the `fastest-lap` command
pub fn run_fastest_lap(args: &FastestLapArgs, config: &EngineConfig) -> Result<()> {
    let analysis = load_session(&args.csv, config)?;

    let report = FastestLapReport {
        fastest: analysis.fastest_lap(),
        laps: args.all.then(|| analysis.lap_times()),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize fastest lap report")?;
        println!("{}", json);
        return Ok(());
    }

    match &report.fastest {
        Some(lap) => println!(
            "Fastest lap: {} lap {} ({:.3} s)",
            lap.vehicle_id, lap.lap_number, lap.elapsed_s
        ),
        None => println!(
            "Fastest lap: none (no lap between {} s and {} s)",
            config.laps.min_lap_s, config.laps.max_lap_s
        ),
    }

    if let Some(laps) = &report.laps {
        println!("\n  {:<16} {:>4} {:>10}", "Vehicle", "Lap", "Time (s)");
        for lap in laps {
            let marker = if config.laps.accepts(lap.elapsed_s) { "" } else { "  (ignored)" };
            println!(
                "  {:<16} {:>4} {:>10.3}{}",
                lap.vehicle_id.as_str(),
                lap.lap_number,
                lap.elapsed_s,
                marker
            );
        }
    }

    Ok(())
}
