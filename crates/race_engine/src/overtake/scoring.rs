//! Score components and their weighted blend.

use contracts::ScoreWeights;

/// Logistic squash, input clipped to [-20, 20]. 0.5 at zero.
pub fn logistic(x: f64) -> f64 {
    let x = x.clamp(-20.0, 20.0);
    1.0 / (1.0 + (-x).exp())
}

/// `1 - clamp(ttc / tbb, 0, 1)`; a zero braking window scores 0.
pub fn gap_score(time_to_close_s: f64, time_before_brake_s: f64) -> f64 {
    let ratio = if time_before_brake_s > 0.0 {
        time_to_close_s / time_before_brake_s
    } else {
        1.0
    };
    1.0 - ratio.clamp(0.0, 1.0)
}

pub fn probability(weights: &ScoreWeights, speed_score: f64, gap_score: f64, space_ok: bool) -> f64 {
    let space_score = if space_ok { 1.0 } else { 0.0 };
    weights.speed * speed_score + weights.gap * gap_score + weights.space * space_score
}
