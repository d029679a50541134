//! Engine configuration contracts shared across crates.
//!
//! Every field has a default equal to the engine's built-in constant, so an
//! empty config file reproduces stock behaviour.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Root engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EngineConfig {
    /// Configuration version
    pub version: ConfigVersion,

    /// Long -> wide pivot settings
    #[validate(nested)]
    pub ingestion: IngestionConfig,

    /// Lap plausibility window
    #[validate(nested)]
    pub laps: LapWindowConfig,

    /// Overtake model parameters
    #[validate(nested)]
    pub overtake: OvertakeConfig,

    /// Host replay loop settings
    #[validate(nested)]
    pub replay: ReplayConfig,
}

/// Ingestion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct IngestionConfig {
    /// Drop in track distance (meters) that marks a new lap
    #[validate(range(exclusive_min = 0.0))]
    pub lap_reset_threshold_m: f64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            lap_reset_threshold_m: 1000.0,
        }
    }
}

/// Lap plausibility window (exclusive on both ends)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LapWindowConfig {
    /// Laps at or below this are partial (out-laps, session edges)
    #[validate(range(min = 0.0))]
    pub min_lap_s: f64,
    /// Laps at or above this are outliers (pit stops, cautions)
    #[validate(range(exclusive_min = 0.0))]
    pub max_lap_s: f64,
}

impl Default for LapWindowConfig {
    fn default() -> Self {
        Self {
            min_lap_s: 60.0,
            max_lap_s: 300.0,
        }
    }
}

impl LapWindowConfig {
    /// Whether an elapsed lap time is plausible
    pub fn accepts(&self, elapsed_s: f64) -> bool {
        elapsed_s > self.min_lap_s && elapsed_s < self.max_lap_s
    }
}

/// Overtake model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OvertakeConfig {
    /// Velocity projection horizon, seconds
    #[validate(range(min = 0.0))]
    pub horizon_s: f64,

    /// Brake pressure above which the rival counts as braking, bar
    #[validate(range(min = 0.0))]
    pub brake_pressure_threshold_bar: f64,

    /// Longitudinal G below which the rival counts as braking
    #[validate(range(max = 0.0))]
    pub braking_g_threshold: f64,

    /// Assumed decel when the rival is not braking, m/s²
    #[validate(range(exclusive_min = 0.0))]
    pub corner_decel_mps2: f64,

    /// Lower clamp for measured braking decel, m/s²
    #[validate(range(exclusive_min = 0.0))]
    pub min_decel_mps2: f64,

    /// Upper clamp for measured braking decel, m/s²
    #[validate(range(exclusive_min = 0.0))]
    pub max_decel_mps2: f64,

    /// Closing speeds at or below this never produce a finite time-to-close
    #[validate(range(min = 0.0))]
    pub min_closing_speed_mps: f64,

    /// Track-distance gaps at or above this fall back to GPS, meters
    #[validate(range(exclusive_min = 0.0))]
    pub max_track_gap_m: f64,

    /// Gap used when neither track distance nor GPS is usable, meters
    #[validate(range(min = 0.0))]
    pub default_gap_m: f64,

    /// Hero lateral G must stay below this for space to be available
    #[validate(range(min = 0.0))]
    pub space_max_lateral_g: f64,

    /// Hero steering must stay below this, degrees
    #[validate(range(min = 0.0))]
    pub space_max_hero_steer_deg: f64,

    /// Rival steering must stay below this, degrees
    #[validate(range(min = 0.0))]
    pub space_max_rival_steer_deg: f64,

    /// Probability at or above which the move is recommended
    #[validate(range(min = 0.0, max = 1.0))]
    pub decision_threshold: f64,

    /// Score weights
    #[validate(nested)]
    pub weights: ScoreWeights,

    /// Coaching message thresholds
    #[validate(nested)]
    pub feedback: FeedbackConfig,
}

impl Default for OvertakeConfig {
    fn default() -> Self {
        Self {
            horizon_s: 2.0,
            brake_pressure_threshold_bar: 1.0,
            braking_g_threshold: -0.25,
            corner_decel_mps2: 5.0,
            min_decel_mps2: 2.0,
            max_decel_mps2: 15.0,
            min_closing_speed_mps: 0.1,
            max_track_gap_m: 2000.0,
            default_gap_m: 100.0,
            space_max_lateral_g: 0.3,
            space_max_hero_steer_deg: 20.0,
            space_max_rival_steer_deg: 30.0,
            decision_threshold: 0.65,
            weights: ScoreWeights::default(),
            feedback: FeedbackConfig::default(),
        }
    }
}

/// Probability = speed·speed_score + gap·gap_score + space·space_score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ScoreWeights {
    #[validate(range(min = 0.0, max = 1.0))]
    pub speed: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub gap: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub space: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            speed: 0.50,
            gap: 0.35,
            space: 0.15,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.speed + self.gap + self.space
    }
}

/// Coaching message thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Speed difference that triggers a "faster" message, m/s
    #[validate(range(min = 0.0))]
    pub speed_delta_mps: f64,

    /// Hero front brake pressure below which the rival "brakes earlier", bar
    #[validate(range(min = 0.0))]
    pub hero_brake_bar: f64,

    /// Throttle lead (percentage points) that triggers a throttle message
    #[validate(range(min = 0.0, max = 100.0))]
    pub throttle_margin_pct: f64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            speed_delta_mps: 2.0,
            hero_brake_bar: 5.0,
            throttle_margin_pct: 20.0,
        }
    }
}

/// Host replay loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReplayConfig {
    /// EMA weight of the newest probability (0.1 smooth .. 0.9 reactive)
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub smoothing_alpha: f64,

    /// Hero samples advanced per frame
    #[validate(range(min = 1))]
    pub speed_multiplier: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: 0.15,
            speed_multiplier: 2,
        }
    }
}
