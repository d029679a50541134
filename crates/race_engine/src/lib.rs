//! # Race Engine
//!
//! Position-synchronized race analysis over a loaded session.
//!
//! Responsibilities:
//! - Index the wide table into one series per vehicle
//! - Lap timing and fastest-lap selection
//! - Nearest-by-distance state lookup
//! - Equal-distance sector timing
//! - Overtake probability and decision per (hero, rival) frame
//!
//! ## Usage
//!
//! ```ignore
//! use race_engine::{BattleSetup, RaceAnalysis, RivalMode, evaluate_frame};
//!
//! let analysis = RaceAnalysis::new(ingestion::load(path)?);
//! let setup = BattleSetup::resolve(&analysis, "GR86-002", "GR86-004", RivalMode::Live);
//!
//! if let Some(frame) = evaluate_frame(&analysis, &setup, step) {
//!     println!("{:.0}%", frame.assessment.probability_percent);
//! }
//! ```

mod analysis;
mod assessment;
mod battle;
mod index;
mod laps;
mod lookup;
pub mod overtake;
mod sectors;

pub use analysis::RaceAnalysis;
pub use assessment::{assess, reasons};
pub use battle::{
    advance_step, evaluate_frame, BattleFrame, BattleSetup, ProbabilitySmoother, RivalMode,
};
pub use index::{VehicleIndex, VehicleSeries};
pub use laps::{fastest_lap, lap_times, LapTime};
pub use lookup::{nearest_by_distance, state_at_distance};
pub use overtake::{calculate_overtake_metrics, OvertakeEngine};
pub use sectors::{analyze_sectors, SECTOR_COUNT};

pub use contracts::{OvertakeAssessment, OvertakeMetrics, SectorKey, SectorResult};
