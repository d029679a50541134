//! Lap numbering from track-distance resets.

use contracts::WideTable;

/// Assign `lap_number` to every row.
///
/// Each vehicle starts on lap 1; the lap increments whenever distance drops
/// by more than `reset_threshold_m` between consecutive samples. A missing
/// distance on either side never counts as a reset. Recomputed from scratch,
/// so repeated calls yield the same numbering.
pub fn derive_lap_numbers(table: &mut WideTable, reset_threshold_m: f64) {
    for run in table.vehicle_runs_mut() {
        let mut lap = 1;
        let mut prev = None;
        for row in run.iter_mut() {
            let dist = row.distance();
            if let (Some(p), Some(d)) = (prev, dist) {
                if d - p < -reset_threshold_m {
                    lap += 1;
                }
            }
            row.lap_number = lap;
            prev = dist;
        }
    }
}
