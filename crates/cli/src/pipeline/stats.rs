//! Replay statistics.

use std::time::Duration;

use observability::ReplayAggregator;

/// Statistics from a replay run
#[derive(Debug, Clone, Default)]
pub struct ReplayStats {
    /// Frames evaluated
    pub frames: u64,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Per-frame assessment aggregator
    pub aggregator: ReplayAggregator,

    /// Sector comparisons served from cache
    pub sector_cache_hits: u64,

    /// Sector comparisons computed
    pub sector_cache_misses: u64,
}

impl ReplayStats {
    /// Frames evaluated per second of wall-clock time
    pub fn fps(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.frames as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Replay Statistics ===\n");

        println!("Overview");
        println!("   ├─ Duration: {:.3}s", self.duration.as_secs_f64());
        println!("   ├─ Frames: {}", self.frames);
        println!("   ├─ Frames/s: {:.0}", self.fps());
        println!(
            "   └─ Sector cache: {} computed, {} reused",
            self.sector_cache_misses, self.sector_cache_hits
        );

        let summary = self.aggregator.summary();

        println!("\nOvertake Model");
        println!(
            "   ├─ Overtake on: {} ({:.2}%)",
            summary.decision_frames, summary.decision_rate
        );
        println!(
            "   ├─ Missing data: {} ({:.2}%)",
            summary.missing_frames, summary.missing_rate
        );
        println!("   ├─ Closing: {:.2}%", summary.closing_rate);
        println!("   ├─ Probability (%): {}", summary.probability_percent);
        println!("   ├─ Gap (m): {}", summary.gap_m);
        println!("   └─ Closing speed (m/s): {}", summary.closing_speed_mps);

        println!();
    }
}
