//! Replay metrics
//!
//! Per-frame recorders for the `metrics` facade, plus an in-memory
//! aggregator that produces a human-readable replay summary.

use contracts::OvertakeAssessment;
use metrics::{counter, gauge, histogram};

/// Record one frame's assessment.
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_assessment;
///
/// if let Some(frame) = evaluate_frame(&analysis, &setup, step) {
///     record_assessment(&frame.assessment);
/// }
/// ```
pub fn record_assessment(assessment: &OvertakeAssessment) {
    counter!("race_engineer_frames_total").increment(1);
    gauge!("race_engineer_overtake_probability_percent").set(assessment.probability_percent);
    histogram!("race_engineer_overtake_probability_percent_hist")
        .record(assessment.probability_percent);

    let Some(m) = &assessment.metrics else {
        counter!("race_engineer_frames_missing_data_total").increment(1);
        return;
    };

    if m.decision {
        counter!("race_engineer_frames_overtake_on_total").increment(1);
    }
    gauge!("race_engineer_gap_m").set(m.gap_m);
    gauge!("race_engineer_closing_speed_mps").set(m.closing_speed_mps);
    gauge!("race_engineer_space_ok").set(if m.space_ok { 1.0 } else { 0.0 });
    if m.time_to_close_s.is_finite() {
        histogram!("race_engineer_time_to_close_s").record(m.time_to_close_s);
    }
}

/// Record the host-side smoothed probability
pub fn record_smoothed_probability(percent: f64) {
    gauge!("race_engineer_smoothed_probability_percent").set(percent);
}

/// Replay statistics aggregator
#[derive(Debug, Clone, Default)]
pub struct ReplayAggregator {
    /// Frames evaluated
    pub total_frames: u64,

    /// Frames with the overtake decision on
    pub decision_frames: u64,

    /// Frames without a rival (or hero) sample
    pub missing_frames: u64,

    /// Frames with a finite time to close
    pub closing_frames: u64,

    pub probability_stats: RunningStats,
    pub gap_stats: RunningStats,
    pub closing_speed_stats: RunningStats,
}

impl ReplayAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, assessment: &OvertakeAssessment) {
        self.total_frames += 1;
        self.probability_stats.push(assessment.probability_percent);

        match &assessment.metrics {
            Some(m) => {
                if m.decision {
                    self.decision_frames += 1;
                }
                if m.is_closing() {
                    self.closing_frames += 1;
                }
                self.gap_stats.push(m.gap_m);
                self.closing_speed_stats.push(m.closing_speed_mps);
            }
            None => self.missing_frames += 1,
        }
    }

    pub fn summary(&self) -> ReplaySummary {
        let rate = |n: u64| {
            if self.total_frames > 0 {
                n as f64 / self.total_frames as f64 * 100.0
            } else {
                0.0
            }
        };

        ReplaySummary {
            total_frames: self.total_frames,
            decision_frames: self.decision_frames,
            missing_frames: self.missing_frames,
            decision_rate: rate(self.decision_frames),
            missing_rate: rate(self.missing_frames),
            closing_rate: rate(self.closing_frames),
            probability_percent: StatsSummary::from(&self.probability_stats),
            gap_m: StatsSummary::from(&self.gap_stats),
            closing_speed_mps: StatsSummary::from(&self.closing_speed_stats),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Replay summary
#[derive(Debug, Clone, Default)]
pub struct ReplaySummary {
    pub total_frames: u64,
    pub decision_frames: u64,
    pub missing_frames: u64,
    pub decision_rate: f64,
    pub missing_rate: f64,
    pub closing_rate: f64,
    pub probability_percent: StatsSummary,
    pub gap_m: StatsSummary,
    pub closing_speed_mps: StatsSummary,
}

impl std::fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Replay Summary ===")?;
        writeln!(f, "Frames: {}", self.total_frames)?;
        writeln!(
            f,
            "Overtake on: {} ({:.2}%)",
            self.decision_frames, self.decision_rate
        )?;
        writeln!(
            f,
            "Missing data: {} ({:.2}%)",
            self.missing_frames, self.missing_rate
        )?;
        writeln!(f, "Closing: {:.2}%", self.closing_rate)?;
        writeln!(f, "Probability (%): {}", self.probability_percent)?;
        writeln!(f, "Gap (m): {}", self.gap_m)?;
        write!(f, "Closing speed (m/s): {}", self.closing_speed_mps)
    }
}

/// Summary of a [`RunningStats`]
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.2}, max={:.2}, mean={:.2}, std={:.2} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
