//! Rival braking detection and time-to-braking-zone estimate.

use contracts::{Channel, OvertakeConfig, VehicleSample};

use super::GRAVITY;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrakingEstimate {
    /// Rival is on the brakes (pressure or longitudinal G)
    pub rival_braking: bool,
    /// Expected deceleration ahead, m/s²
    pub decel_mps2: f64,
}

/// Classify the rival and pick the deceleration the hero will face.
///
/// A braking rival's measured decel is clamped to the configured range;
/// otherwise a conservative corner-approach decel is assumed.
pub fn estimate_braking(rival: &VehicleSample, config: &OvertakeConfig) -> BrakingEstimate {
    let accx_g = rival.get_or(Channel::AccelX, 0.0);
    let rival_braking = rival.get_or(Channel::BrakeFront, 0.0) > config.brake_pressure_threshold_bar
        || rival.get_or(Channel::BrakeRear, 0.0) > config.brake_pressure_threshold_bar
        || accx_g < config.braking_g_threshold;

    let decel_mps2 = if rival_braking {
        (accx_g * GRAVITY)
            .abs()
            .clamp(config.min_decel_mps2, config.max_decel_mps2)
    } else {
        config.corner_decel_mps2
    };

    BrakingEstimate {
        rival_braking,
        decel_mps2,
    }
}

/// Seconds the hero has before it must brake: `(v² / 2a) / max(v, 1)`
pub fn time_before_brake_s(hero_speed_mps: f64, decel_mps2: f64) -> f64 {
    let dist_before_brake = hero_speed_mps.powi(2) / (2.0 * decel_mps2);
    dist_before_brake / hero_speed_mps.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn rival() -> VehicleSample {
        VehicleSample::new("rival", DateTime::<Utc>::UNIX_EPOCH)
    }

    #[test]
    fn test_coasting_rival_uses_corner_decel() {
        let est = estimate_braking(&rival().with(Channel::AccelX, -0.1), &OvertakeConfig::default());
        assert!(!est.rival_braking);
        assert_eq!(est.decel_mps2, 5.0);
    }

    #[test]
    fn test_pressure_triggers_braking_with_min_clamp() {
        let est = estimate_braking(&rival().with(Channel::BrakeRear, 1.5), &OvertakeConfig::default());
        assert!(est.rival_braking);
        assert_eq!(est.decel_mps2, 2.0);
    }

    #[test]
    fn test_hard_braking_clamped_high() {
        let est = estimate_braking(&rival().with(Channel::AccelX, -2.0), &OvertakeConfig::default());
        assert!(est.rival_braking);
        assert_eq!(est.decel_mps2, 15.0);
    }

    #[test]
    fn test_measured_decel_in_range() {
        let est = estimate_braking(&rival().with(Channel::AccelX, -1.0), &OvertakeConfig::default());
        assert!((est.decel_mps2 - 9.81).abs() < 1e-9);
    }

    #[test]
    fn test_time_before_brake_stationary_hero() {
        assert_eq!(time_before_brake_s(0.0, 5.0), 0.0);
        assert!((time_before_brake_s(40.0, 5.0) - 4.0).abs() < 1e-9);
    }
}
