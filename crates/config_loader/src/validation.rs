//! Config validation
//!
//! Rules:
//! - per-field ranges (declared on the contract structs)
//! - min_lap_s < max_lap_s
//! - min_decel_mps2 <= max_decel_mps2
//! - score weights sum to 1

use contracts::{ContractError, EngineConfig};
use validator::Validate;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate an EngineConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &EngineConfig) -> Result<(), ContractError> {
    validate_ranges(config)?;
    validate_lap_window(config)?;
    validate_decel_clamp(config)?;
    validate_weights(config)?;
    Ok(())
}

fn validate_ranges(config: &EngineConfig) -> Result<(), ContractError> {
    config
        .validate()
        .map_err(|e| ContractError::config_validation("engine", e.to_string()))
}

fn validate_lap_window(config: &EngineConfig) -> Result<(), ContractError> {
    let laps = &config.laps;
    if laps.min_lap_s >= laps.max_lap_s {
        return Err(ContractError::config_validation(
            "laps.min_lap_s / laps.max_lap_s",
            format!(
                "min_lap_s ({}) must be < max_lap_s ({})",
                laps.min_lap_s, laps.max_lap_s
            ),
        ));
    }
    Ok(())
}

fn validate_decel_clamp(config: &EngineConfig) -> Result<(), ContractError> {
    let o = &config.overtake;
    if o.min_decel_mps2 > o.max_decel_mps2 {
        return Err(ContractError::config_validation(
            "overtake.min_decel_mps2 / overtake.max_decel_mps2",
            format!(
                "min_decel_mps2 ({}) must be <= max_decel_mps2 ({})",
                o.min_decel_mps2, o.max_decel_mps2
            ),
        ));
    }
    Ok(())
}

fn validate_weights(config: &EngineConfig) -> Result<(), ContractError> {
    let total = config.overtake.weights.total();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ContractError::config_validation(
            "overtake.weights",
            format!("weights must sum to 1.0, got {total}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(validate(&EngineConfig::default()).is_ok());
    }

    #[test]
    fn test_inverted_lap_window() {
        let mut config = EngineConfig::default();
        config.laps.min_lap_s = 400.0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("min_lap_s"), "got: {err}");
    }

    #[test]
    fn test_inverted_decel_clamp() {
        let mut config = EngineConfig::default();
        config.overtake.min_decel_mps2 = 20.0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("min_decel_mps2"), "got: {err}");
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = EngineConfig::default();
        config.overtake.weights.space = 0.5;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("sum to 1.0"), "got: {err}");
    }

    #[test]
    fn test_negative_reset_threshold_rejected() {
        let mut config = EngineConfig::default();
        config.ingestion.lap_reset_threshold_m = -5.0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("lap_reset_threshold_m"), "got: {err}");
    }

    #[test]
    fn test_zero_alpha_rejected() {
        let mut config = EngineConfig::default();
        config.replay.smoothing_alpha = 0.0;
        assert!(validate(&config).is_err());
    }
}
