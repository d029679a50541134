//! Distance-synchronized state lookup.
//!
//! Two cars rarely pass the same point at the same instant, so the rival is
//! matched by track position rather than by time.

use contracts::VehicleSample;

use crate::index::VehicleSeries;

/// Sample of `series` whose distance is nearest `target_m`.
///
/// With `lap`, only that lap is searched. `None` when the lap filter is
/// empty or no sample reports a distance. Ties keep the earliest sample.
pub fn state_at_distance(
    series: &VehicleSeries,
    target_m: f64,
    lap: Option<u32>,
) -> Option<&VehicleSample> {
    let samples = match lap {
        Some(lap) => series.lap(lap),
        None => series.samples(),
    };
    nearest_by_distance(samples, target_m)
}

/// Argmin of `|distance - target_m|` over samples that report a distance
pub fn nearest_by_distance(samples: &[VehicleSample], target_m: f64) -> Option<&VehicleSample> {
    let mut best: Option<(&VehicleSample, f64)> = None;
    for sample in samples {
        let Some(dist) = sample.distance() else {
            continue;
        };
        let err = (dist - target_m).abs();
        if best.map_or(true, |(_, best_err)| err < best_err) {
            best = Some((sample, err));
        }
    }
    best.map(|(sample, _)| sample)
}
