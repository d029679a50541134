//! Battle frames: pure helpers for a host render loop.
//!
//! The host owns the frame step and the smoothed probability; these helpers
//! take that state in and hand new state back.

use contracts::{OvertakeAssessment, VehicleId};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::analysis::RaceAnalysis;

/// How the rival is chosen and synchronized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RivalMode {
    /// Chosen rival, matched on the hero's current lap
    #[default]
    Live,
    /// Session-best lap, whoever drove it
    Ghost,
}

/// Resolved participants of a battle
#[derive(Debug, Clone, PartialEq)]
pub struct BattleSetup {
    pub hero_id: VehicleId,
    pub rival_id: VehicleId,
    pub mode: RivalMode,
    /// Fixed rival lap (ghost mode only)
    pub rival_lap: Option<u32>,
}

impl BattleSetup {
    /// Resolve the rival for `mode`.
    ///
    /// Ghost mode swaps in the fastest-lap owner and pins that lap. Without
    /// a plausible lap it keeps `rival_id` and searches its whole timeline.
    pub fn resolve(
        analysis: &RaceAnalysis,
        hero_id: impl Into<VehicleId>,
        rival_id: impl Into<VehicleId>,
        mode: RivalMode,
    ) -> Self {
        let hero_id = hero_id.into();
        let rival_id = rival_id.into();

        match mode {
            RivalMode::Live => Self {
                hero_id,
                rival_id,
                mode,
                rival_lap: None,
            },
            RivalMode::Ghost => match analysis.get_fastest_lap() {
                Some((ghost_id, ghost_lap)) => Self {
                    hero_id,
                    rival_id: ghost_id,
                    mode,
                    rival_lap: Some(ghost_lap),
                },
                None => {
                    warn!(rival = %rival_id, "No ghost lap found, using rival's full timeline");
                    Self {
                        hero_id,
                        rival_id,
                        mode,
                        rival_lap: None,
                    }
                }
            },
        }
    }

    /// Rival lap to search for a hero currently on `hero_lap`
    pub fn rival_target_lap(&self, hero_lap: u32) -> Option<u32> {
        match self.mode {
            RivalMode::Live => Some(hero_lap),
            RivalMode::Ghost => self.rival_lap,
        }
    }
}

/// One evaluated frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleFrame {
    /// Hero sample index actually used
    pub step: usize,
    pub hero_lap: u32,
    pub hero_distance_m: Option<f64>,
    pub rival_lap: Option<u32>,
    pub assessment: OvertakeAssessment,
}

/// Evaluate the frame at `step`.
///
/// The hero sample is `min(step, len - 1)`; the rival sample is the one
/// nearest the hero's track distance. `None` only when the hero has no
/// samples at all.
#[instrument(level = "trace", skip(analysis), fields(hero = %setup.hero_id, rival = %setup.rival_id))]
pub fn evaluate_frame(analysis: &RaceAnalysis, setup: &BattleSetup, step: usize) -> Option<BattleFrame> {
    let hero_series = analysis.series(&setup.hero_id)?;
    let last = hero_series.len().checked_sub(1)?;
    let step = step.min(last);
    let hero = &hero_series.samples()[step];

    let rival_lap = setup.rival_target_lap(hero.lap_number);
    let rival = hero
        .distance()
        .and_then(|d| analysis.get_car_state_at_distance(&setup.rival_id, d, rival_lap));

    Some(BattleFrame {
        step,
        hero_lap: hero.lap_number,
        hero_distance_m: hero.distance(),
        rival_lap,
        assessment: analysis.calculate_overtake_probability(Some(hero), rival),
    })
}

/// Next step; wraps to 0 once it passes the end of the hero series
pub fn advance_step(step: usize, multiplier: usize, len: usize) -> usize {
    let next = step.saturating_add(multiplier);
    if next >= len {
        0
    } else {
        next
    }
}

/// Exponential moving average held by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilitySmoother {
    alpha: f64,
    value: f64,
}

impl ProbabilitySmoother {
    /// `alpha` is the weight of the newest value (0.1 smooth .. 0.9 reactive)
    pub fn new(alpha: f64) -> Self {
        Self { alpha, value: 0.0 }
    }

    pub fn update(&mut self, sample: f64) -> f64 {
        self.value = self.alpha * sample + (1.0 - self.alpha) * self.value;
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

impl Default for ProbabilitySmoother {
    fn default() -> Self {
        Self::new(0.15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::test_support::sample;
    use contracts::{Channel, WideTable};

    fn with_speed(mut s: contracts::VehicleSample, kmh: f64) -> contracts::VehicleSample {
        s.set(Channel::Speed, Some(kmh));
        s
    }

    fn analysis() -> RaceAnalysis {
        let mut rows = Vec::new();
        for (i, d) in [0.0, 100.0, 200.0, 300.0].into_iter().enumerate() {
            rows.push(with_speed(sample("hero", i as f64, 1, d), 150.0));
        }
        rows.push(with_speed(sample("hero", 95.0, 2, 50.0), 150.0));
        // rival lap 1 runs 90 s, lap 2 is partial
        for (t, lap, d) in [(0.0, 1, 10.0), (45.0, 1, 110.0), (90.0, 1, 210.0), (91.0, 2, 60.0)] {
            rows.push(with_speed(sample("rival", t, lap, d), 130.0));
        }
        RaceAnalysis::new(WideTable::from_rows(rows))
    }

    #[test]
    fn test_live_matches_hero_lap() {
        let a = analysis();
        let setup = BattleSetup::resolve(&a, "hero", "rival", RivalMode::Live);
        let frame = evaluate_frame(&a, &setup, 4).unwrap();
        assert_eq!(frame.hero_lap, 2);
        assert_eq!(frame.rival_lap, Some(2));
        let m = frame.assessment.metrics.unwrap();
        assert!((m.gap_m - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_clamped_to_last_sample() {
        let a = analysis();
        let setup = BattleSetup::resolve(&a, "hero", "rival", RivalMode::Live);
        let frame = evaluate_frame(&a, &setup, 999).unwrap();
        assert_eq!(frame.step, 4);
    }

    #[test]
    fn test_ghost_pins_fastest_lap() {
        let a = analysis();
        let setup = BattleSetup::resolve(&a, "hero", "someone", RivalMode::Ghost);
        assert_eq!(setup.rival_id, "rival");
        assert_eq!(setup.rival_lap, Some(1));
        assert_eq!(setup.rival_target_lap(2), Some(1));
    }

    #[test]
    fn test_ghost_without_plausible_lap_uses_full_timeline() {
        let rows = vec![sample("hero", 0.0, 1, 0.0), sample("rival", 0.0, 1, 5.0)];
        let a = RaceAnalysis::new(WideTable::from_rows(rows));
        let setup = BattleSetup::resolve(&a, "hero", "rival", RivalMode::Ghost);
        assert_eq!(setup.rival_id, "rival");
        assert_eq!(setup.rival_target_lap(1), None);
        let frame = evaluate_frame(&a, &setup, 0).unwrap();
        assert!(frame.assessment.metrics.is_some());
    }

    #[test]
    fn test_unknown_rival_is_missing_data() {
        let a = analysis();
        let setup = BattleSetup::resolve(&a, "hero", "nobody", RivalMode::Live);
        let frame = evaluate_frame(&a, &setup, 0).unwrap();
        assert_eq!(frame.assessment.reasons, vec!["Missing Data"]);
    }

    #[test]
    fn test_unknown_hero_has_no_frame() {
        let a = analysis();
        let setup = BattleSetup::resolve(&a, "nobody", "rival", RivalMode::Live);
        assert!(evaluate_frame(&a, &setup, 0).is_none());
    }

    #[test]
    fn test_advance_wraps() {
        assert_eq!(advance_step(0, 2, 5), 2);
        assert_eq!(advance_step(2, 2, 5), 4);
        assert_eq!(advance_step(4, 2, 5), 0);
        assert_eq!(advance_step(0, 2, 0), 0);
    }

    #[test]
    fn test_smoother() {
        let mut s = ProbabilitySmoother::default();
        assert!((s.update(100.0) - 15.0).abs() < 1e-12);
        assert!((s.update(100.0) - 27.75).abs() < 1e-12);
        s.reset();
        assert_eq!(s.value(), 0.0);
    }
}
