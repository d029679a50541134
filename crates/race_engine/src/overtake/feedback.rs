//! Driver coaching messages.

use contracts::{Channel, FeedbackConfig, VehicleSample};

use super::KMH_PER_MPS;

/// Independent checks; every one that fires adds a message, in this order.
///
/// `speed_diff_mps` is the current (unprojected) hero minus rival speed.
pub fn coaching(
    hero: &VehicleSample,
    rival: &VehicleSample,
    speed_diff_mps: f64,
    rival_braking: bool,
    config: &FeedbackConfig,
) -> Vec<String> {
    let mut feedback = Vec::new();

    if speed_diff_mps.abs() > config.speed_delta_mps {
        let kmh = speed_diff_mps.abs() * KMH_PER_MPS;
        if speed_diff_mps > 0.0 {
            feedback.push(format!("You are {kmh:.0} km/h FASTER"));
        } else {
            feedback.push(format!("Rival is {kmh:.0} km/h FASTER"));
        }
    }

    if rival_braking && hero.get_or(Channel::BrakeFront, 0.0) < config.hero_brake_bar {
        feedback.push("Rival is BRAKING earlier".to_string());
    }

    let hero_aps = hero.get_or(Channel::Throttle, 0.0);
    let rival_aps = rival.get_or(Channel::Throttle, 0.0);
    if rival_aps > hero_aps + config.throttle_margin_pct {
        feedback.push("Rival is on THROTTLE earlier".to_string());
    }

    feedback
}
