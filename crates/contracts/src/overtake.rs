//! Overtake engine output types.

use serde::{Deserialize, Serialize};

/// Full result of one overtake evaluation.
///
/// Computed fresh per (hero, rival) pair; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertakeMetrics {
    /// Weighted probability, 0..=1
    pub probability: f64,

    /// Whether the move is on: probability, time window and space all agree
    pub decision: bool,

    /// Spatial gap, meters
    pub gap_m: f64,

    /// Projected approach rate, m/s (negative = rival pulling away)
    pub closing_speed_mps: f64,

    /// Seconds to close the gap; `f64::INFINITY` when not closing
    pub time_to_close_s: f64,

    /// Seconds until the next braking zone
    pub time_before_brake_s: f64,

    /// Whether geometry permits a side-by-side move
    pub space_ok: bool,

    /// Logistic score of closing speed
    pub speed_score: f64,

    /// Score of time-to-close vs time-before-brake
    pub gap_score: f64,

    /// Coaching messages, in check order
    pub feedback: Vec<String>,
}

impl OvertakeMetrics {
    /// Whether the hero is actually approaching
    pub fn is_closing(&self) -> bool {
        self.time_to_close_s.is_finite()
    }

    /// Whether the gap closes before the braking zone
    pub fn window_open(&self) -> bool {
        self.time_to_close_s < self.time_before_brake_s
    }
}

/// Presentation-facing assessment wrapping [`OvertakeMetrics`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertakeAssessment {
    /// Probability as a percentage, 0..=100
    pub probability_percent: f64,

    /// Ordered human-readable decision factors
    pub reasons: Vec<String>,

    /// Underlying metrics; `None` when either snapshot was missing
    pub metrics: Option<OvertakeMetrics>,

    /// Coaching messages (copied from the metrics)
    pub feedback: Vec<String>,
}

impl OvertakeAssessment {
    /// Assessment for a frame with no hero or no rival sample
    pub fn missing_data() -> Self {
        Self {
            probability_percent: 0.0,
            reasons: vec!["Missing Data".to_string()],
            metrics: None,
            feedback: Vec::new(),
        }
    }

    pub fn decision(&self) -> bool {
        self.metrics.as_ref().is_some_and(|m| m.decision)
    }
}
