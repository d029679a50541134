//! `replay` command implementation.

use anyhow::{Context, Result};
use contracts::EngineConfig;
use race_engine::BattleSetup;
use serde::Serialize;
use tracing::{info, warn};

use super::{load_session, require_vehicle};
use crate::cli::ReplayArgs;
use crate::error::CliError;
use crate::pipeline::{Replay, ReplayTick};

#[derive(Serialize)]
struct TickLine<'a> {
    #[serde(flatten)]
    frame: &'a race_engine::BattleFrame,
    smoothed_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sectors: Option<&'a [contracts::SectorResult]>,
}

/// Execute the `replay` command
pub fn run_replay(args: &ReplayArgs, config: &EngineConfig) -> Result<()> {
    if args.every == 0 {
        return Err(CliError::invalid_argument("--every must be at least 1").into());
    }
    let mut replay_config = config.replay.clone();
    if let Some(speed) = args.speed {
        if speed == 0 {
            return Err(CliError::invalid_argument("--speed must be at least 1").into());
        }
        replay_config.speed_multiplier = speed;
    }

    let analysis = load_session(&args.csv, config)?;
    require_vehicle(&analysis, &args.hero)?;
    require_vehicle(&analysis, &args.rival)?;

    let setup = BattleSetup::resolve(&analysis, args.hero.as_str(), args.rival.as_str(), args.mode.into());
    let mut replay = Replay::new(&analysis, setup, args.start, &replay_config);
    if args.start >= replay.hero_len() {
        return Err(CliError::invalid_argument(format!(
            "--start {} is past the end of the hero series ({} samples)",
            args.start,
            replay.hero_len()
        ))
        .into());
    }

    let frames = args
        .frames
        .unwrap_or_else(|| replay.hero_len().div_ceil(replay_config.speed_multiplier));

    info!(
        hero = %replay.setup().hero_id,
        rival = %replay.setup().rival_id,
        mode = ?replay.setup().mode,
        rival_lap = ?replay.setup().rival_lap,
        frames,
        multiplier = replay_config.speed_multiplier,
        "Starting replay"
    );

    for n in 0..frames {
        let Some(tick) = replay.tick() else {
            warn!(frame = n, "Hero series exhausted");
            break;
        };
        if n % args.every == 0 || tick.new_sectors.is_some() {
            print_tick(&tick, args.json)?;
        }
    }

    let stats = replay.finish();
    info!(
        frames = stats.frames,
        duration_ms = stats.duration.as_millis() as u64,
        "Replay finished"
    );
    if !args.json {
        stats.print_summary();
    }

    Ok(())
}

fn print_tick(tick: &ReplayTick, json: bool) -> Result<()> {
    if json {
        let line = TickLine {
            frame: &tick.frame,
            smoothed_percent: tick.smoothed_percent,
            sectors: tick.new_sectors.as_deref(),
        };
        println!(
            "{}",
            serde_json::to_string(&line).context("Failed to serialize replay frame")?
        );
        return Ok(());
    }

    let frame = &tick.frame;
    let assessment = &frame.assessment;
    let status = if assessment.decision() {
        "GO"
    } else if assessment.metrics.is_none() {
        "--"
    } else {
        "hold"
    };
    println!(
        "[{:>5}] lap {:>2} {:>7.1} m  {:>5.1}% (avg {:>5.1}%) {:<4} {}",
        frame.step,
        frame.hero_lap,
        frame.hero_distance_m.unwrap_or(f64::NAN),
        assessment.probability_percent,
        tick.smoothed_percent,
        status,
        assessment.reasons.join("; ")
    );
    for line in &assessment.feedback {
        println!("          > {}", line);
    }

    if let Some(sectors) = &tick.new_sectors {
        let rival_lap = frame
            .rival_lap
            .map_or_else(|| "?".to_string(), |l| l.to_string());
        println!("          sectors vs rival lap {}:", rival_lap);
        for s in sectors {
            let tag = if s.hero_faster() { "faster" } else { "slower" };
            println!(
                "            S{} {:>8.3} s vs {:>8.3} s ({:+.3} s, {})",
                s.sector_index, s.hero_time_s, s.rival_time_s, s.delta_s, tag
            );
        }
    }

    Ok(())
}
