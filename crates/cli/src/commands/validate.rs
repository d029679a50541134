//! `validate-config` command implementation.

use anyhow::{Context, Result};
use contracts::EngineConfig;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    lap_reset_threshold_m: f64,
    lap_window_s: (f64, f64),
    decision_threshold: f64,
    weights: (f64, f64, f64),
    smoothing_alpha: f64,
    speed_multiplier: usize,
}

impl From<&EngineConfig> for ConfigSummary {
    fn from(config: &EngineConfig) -> Self {
        let w = &config.overtake.weights;
        Self {
            version: format!("{:?}", config.version),
            lap_reset_threshold_m: config.ingestion.lap_reset_threshold_m,
            lap_window_s: (config.laps.min_lap_s, config.laps.max_lap_s),
            decision_threshold: config.overtake.decision_threshold,
            weights: (w.speed, w.gap, w.space),
            smoothing_alpha: config.replay.smoothing_alpha,
            speed_multiplier: config.replay.speed_multiplier,
        }
    }
}

/// Execute the `validate-config` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.path.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.path.display().to_string();

    if !args.path.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.path.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.path) {
        Ok(config) => {
            let warnings = collect_warnings(&config);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary::from(&config)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (legal but suspicious values)
fn collect_warnings(config: &EngineConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    let overtake = &config.overtake;

    if overtake.decision_threshold >= 1.0 {
        warnings.push(
            "overtake.decision_threshold is 1.0; scores never reach it, the move is never recommended"
                .to_string(),
        );
    } else if overtake.decision_threshold > overtake.weights.speed + overtake.weights.gap {
        warnings.push(format!(
            "overtake.decision_threshold {:.2} is only reachable with space available",
            overtake.decision_threshold
        ));
    }
    if config.replay.smoothing_alpha > 0.5 {
        warnings.push(format!(
            "replay.smoothing_alpha {:.2} is very reactive; the smoothed probability will flicker",
            config.replay.smoothing_alpha
        ));
    }
    if config.ingestion.lap_reset_threshold_m < 100.0 {
        warnings.push(
            "ingestion.lap_reset_threshold_m below 100 m may split laps on GPS noise".to_string(),
        );
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Lap reset threshold: {} m", summary.lap_reset_threshold_m);
            println!(
                "  Lap window: ({}, {}) s",
                summary.lap_window_s.0, summary.lap_window_s.1
            );
            println!("  Decision threshold: {}", summary.decision_threshold);
            println!(
                "  Weights: speed {} / gap {} / space {}",
                summary.weights.0, summary.weights.1, summary.weights.2
            );
            println!(
                "  Replay: alpha {}, x{}",
                summary.smoothing_alpha, summary.speed_multiplier
            );
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn args_for(path: PathBuf) -> ValidateArgs {
        ValidateArgs { path, json: false }
    }

    #[test]
    fn test_stock_config_has_no_warnings() {
        assert!(collect_warnings(&EngineConfig::default()).is_empty());
    }

    #[test]
    fn test_unreachable_threshold_warns() {
        let mut config = EngineConfig::default();
        config.overtake.decision_threshold = 1.0;
        let warnings = collect_warnings(&config);
        assert!(warnings.iter().any(|w| w.contains("never recommended")), "{warnings:?}");
    }

    #[test]
    fn test_threshold_needing_space_warns() {
        let mut config = EngineConfig::default();
        config.overtake.decision_threshold = 0.9;
        let warnings = collect_warnings(&config);
        assert!(warnings.iter().any(|w| w.contains("space available")), "{warnings:?}");
    }

    #[test]
    fn test_missing_file_is_invalid() {
        let result = validate_config(&args_for(PathBuf::from("/nonexistent/engine.toml")));
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("File not found"));
    }

    #[test]
    fn test_valid_file_has_summary() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[overtake]\ndecision_threshold = 0.7\n").unwrap();

        let result = validate_config(&args_for(file.path().to_path_buf()));
        assert!(result.valid, "{:?}", result.error);
        assert_eq!(result.summary.unwrap().decision_threshold, 0.7);
    }
}
