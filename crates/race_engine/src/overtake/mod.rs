//! Overtake metrics engine
//!
//! A deterministic function of two snapshots (hero, rival):
//! 1. Normalize units (km/h -> m/s, G -> m/s²)
//! 2. Project both speeds over a short horizon
//! 3. Estimate the gap (track distance, then GPS, then a default)
//! 4. Closing speed and time to close
//! 5. Time until the braking zone
//! 6. Space heuristic
//! 7. Weighted probability and the go/no-go decision
//!
//! Missing channels read as 0.0 (track distance as -1.0), so a lossy frame
//! degrades the estimate instead of aborting it.

mod braking;
mod feedback;
mod gap;
mod scoring;

use std::time::Instant;

use contracts::{Channel, OvertakeConfig, OvertakeMetrics, VehicleSample};
use tracing::{instrument, trace};

pub use braking::{estimate_braking, time_before_brake_s, BrakingEstimate};
pub use feedback::coaching;
pub use gap::{estimate_gap, haversine_m, GapEstimate, GapSource, EARTH_RADIUS_M};
pub use scoring::{gap_score, logistic, probability};

/// Standard gravity, m/s²
pub const GRAVITY: f64 = 9.81;

pub const KMH_PER_MPS: f64 = 3.6;

/// Speed and projected speed of one car, SI units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub speed_mps: f64,
    pub future_speed_mps: f64,
}

impl Motion {
    /// `v_future = max(0, v + a·T)`
    pub fn project(sample: &VehicleSample, horizon_s: f64) -> Self {
        let speed_mps = sample.get_or(Channel::Speed, 0.0) / KMH_PER_MPS;
        let accel_mps2 = sample.get_or(Channel::AccelX, 0.0) * GRAVITY;
        Self {
            speed_mps,
            future_speed_mps: (speed_mps + accel_mps2 * horizon_s).max(0.0),
        }
    }
}

/// Overtake evaluator bound to one parameter set
#[derive(Debug, Clone, Default)]
pub struct OvertakeEngine {
    config: OvertakeConfig,
}

impl OvertakeEngine {
    pub fn new(config: OvertakeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OvertakeConfig {
        &self.config
    }

    /// Evaluate one (hero, rival) pair
    #[instrument(
        level = "trace",
        name = "overtake_evaluate",
        skip_all,
        fields(hero = %hero.vehicle_id, rival = %rival.vehicle_id)
    )]
    pub fn evaluate(&self, hero: &VehicleSample, rival: &VehicleSample) -> OvertakeMetrics {
        let started = Instant::now();
        let cfg = &self.config;

        let hero_motion = Motion::project(hero, cfg.horizon_s);
        let rival_motion = Motion::project(rival, cfg.horizon_s);

        let gap = estimate_gap(hero, rival, cfg);

        let closing_speed_mps = hero_motion.future_speed_mps - rival_motion.future_speed_mps;
        let time_to_close_s = if closing_speed_mps > cfg.min_closing_speed_mps {
            gap.gap_m / closing_speed_mps
        } else {
            f64::INFINITY
        };

        let braking = estimate_braking(rival, cfg);
        let time_before_brake_s = time_before_brake_s(hero_motion.speed_mps, braking.decel_mps2);

        let space_ok = self.space_ok(hero, rival);

        let speed_score = logistic(closing_speed_mps);
        let gap_score = gap_score(time_to_close_s, time_before_brake_s);
        let probability = probability(&cfg.weights, speed_score, gap_score, space_ok);

        let decision = probability >= cfg.decision_threshold
            && time_to_close_s < time_before_brake_s
            && space_ok;

        let feedback = coaching(
            hero,
            rival,
            hero_motion.speed_mps - rival_motion.speed_mps,
            braking.rival_braking,
            &cfg.feedback,
        );

        trace!(
            gap_m = gap.gap_m,
            gap_source = ?gap.source,
            closing_speed_mps,
            rival_braking = braking.rival_braking,
            probability,
            decision,
            "Overtake evaluated"
        );

        metrics::counter!(
            "race_engineer_overtake_evaluations_total",
            "decision" => if decision { "go" } else { "hold" }
        )
        .increment(1);
        metrics::histogram!("race_engineer_overtake_eval_seconds")
            .record(started.elapsed().as_secs_f64());

        OvertakeMetrics {
            probability,
            decision,
            gap_m: gap.gap_m,
            closing_speed_mps,
            time_to_close_s,
            time_before_brake_s,
            space_ok,
            speed_score,
            gap_score,
            feedback,
        }
    }

    /// Hero not mid-corner and rival not swerving
    fn space_ok(&self, hero: &VehicleSample, rival: &VehicleSample) -> bool {
        let cfg = &self.config;
        hero.get_or(Channel::AccelY, 0.0).abs() < cfg.space_max_lateral_g
            && hero.get_or(Channel::SteeringAngle, 0.0).abs() < cfg.space_max_hero_steer_deg
            && rival.get_or(Channel::SteeringAngle, 0.0).abs() < cfg.space_max_rival_steer_deg
    }
}

/// Evaluate with the stock parameters
pub fn calculate_overtake_metrics(hero: &VehicleSample, rival: &VehicleSample) -> OvertakeMetrics {
    OvertakeEngine::default().evaluate(hero, rival)
}
