//! Presentation-facing wrapper: percent probability plus ordered reasons.

use contracts::{OvertakeAssessment, OvertakeMetrics, VehicleSample};

use crate::overtake::OvertakeEngine;

/// Closing speed above which the approach counts as "high", m/s
const HIGH_CLOSING_MPS: f64 = 0.5;

/// Assess a frame. Either sample missing yields the "Missing Data" result.
pub fn assess(
    engine: &OvertakeEngine,
    hero: Option<&VehicleSample>,
    rival: Option<&VehicleSample>,
) -> OvertakeAssessment {
    let (Some(hero), Some(rival)) = (hero, rival) else {
        metrics::counter!("race_engineer_missing_data_frames_total").increment(1);
        return OvertakeAssessment::missing_data();
    };

    let metrics = engine.evaluate(hero, rival);
    OvertakeAssessment {
        probability_percent: metrics.probability * 100.0,
        reasons: reasons(&metrics),
        feedback: metrics.feedback.clone(),
        metrics: Some(metrics),
    }
}

/// Decision factors in display order
pub fn reasons(metrics: &OvertakeMetrics) -> Vec<String> {
    let mut reasons = Vec::with_capacity(4);

    if metrics.decision {
        reasons.push("Overtake Feasible".to_string());
    }

    let closing = metrics.closing_speed_mps;
    if closing > HIGH_CLOSING_MPS {
        reasons.push(format!("High Closing Speed ({closing:.1} m/s)"));
    } else if closing > 0.0 {
        reasons.push(format!("Closing ({closing:.1} m/s)"));
    } else {
        reasons.push("Not Closing".to_string());
    }

    reasons.push(
        if metrics.space_ok {
            "Space Available"
        } else {
            "No Space / Cornering"
        }
        .to_string(),
    );

    reasons.push(
        if metrics.window_open() {
            "Time Window Open"
        } else {
            "Braking Zone Too Close"
        }
        .to_string(),
    );

    reasons
}
