//! Per-lap timing and fastest-lap selection.

use contracts::{LapWindowConfig, VehicleId};
use serde::Serialize;

use crate::index::{elapsed_s, VehicleIndex};

/// Elapsed time of one (vehicle, lap) group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapTime {
    pub vehicle_id: VehicleId,
    pub lap_number: u32,
    pub elapsed_s: f64,
}

/// Every lap of every vehicle, in (vehicle id, lap number) order
pub fn lap_times(index: &VehicleIndex) -> Vec<LapTime> {
    index
        .iter()
        .flat_map(|series| {
            series.laps().filter_map(|(lap_number, samples)| {
                elapsed_s(samples).map(|elapsed_s| LapTime {
                    vehicle_id: series.vehicle_id().clone(),
                    lap_number,
                    elapsed_s,
                })
            })
        })
        .collect()
}

/// Fastest plausible lap across all vehicles.
///
/// Laps outside the window are partial or outliers. Ties keep the first lap
/// in (vehicle id, lap number) order.
pub fn fastest_lap(index: &VehicleIndex, window: &LapWindowConfig) -> Option<LapTime> {
    lap_times(index)
        .into_iter()
        .filter(|lap| window.accepts(lap.elapsed_s))
        .fold(None, |best: Option<LapTime>, lap| match best {
            Some(b) if b.elapsed_s <= lap.elapsed_s => Some(b),
            _ => Some(lap),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::test_support::sample;
    use contracts::WideTable;

    /// Two samples spanning `secs` for each (vehicle, lap, start, secs)
    fn index(laps: &[(&str, u32, f64, f64)]) -> VehicleIndex {
        let rows = laps
            .iter()
            .flat_map(|&(v, lap, start, secs)| {
                [sample(v, start, lap, 0.0), sample(v, start + secs, lap, 3000.0)]
            })
            .collect();
        VehicleIndex::build(WideTable::from_rows(rows))
    }

    #[test]
    fn test_fastest_among_plausible() {
        let idx = index(&[("a", 1, 0.0, 100.0), ("a", 2, 200.0, 95.0), ("b", 1, 0.0, 97.0)]);
        let best = fastest_lap(&idx, &LapWindowConfig::default()).unwrap();
        assert_eq!(best.vehicle_id, "a");
        assert_eq!(best.lap_number, 2);
        assert!((best.elapsed_s - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_lap_never_selected() {
        let idx = index(&[("a", 1, 0.0, 45.0), ("b", 1, 0.0, 98.0)]);
        let best = fastest_lap(&idx, &LapWindowConfig::default()).unwrap();
        assert_eq!(best.vehicle_id, "b");
    }

    #[test]
    fn test_window_edges_excluded() {
        let idx = index(&[("a", 1, 0.0, 60.0), ("a", 2, 100.0, 300.0), ("a", 3, 500.0, 400.0)]);
        assert!(fastest_lap(&idx, &LapWindowConfig::default()).is_none());
    }

    #[test]
    fn test_tie_keeps_first() {
        let idx = index(&[("b", 1, 0.0, 90.0), ("a", 2, 0.0, 90.0), ("a", 3, 100.0, 90.0)]);
        let best = fastest_lap(&idx, &LapWindowConfig::default()).unwrap();
        assert_eq!((best.vehicle_id.as_str(), best.lap_number), ("a", 2));
    }

    #[test]
    fn test_lap_times_cover_every_lap() {
        let idx = index(&[("a", 1, 0.0, 45.0), ("a", 2, 50.0, 90.0), ("b", 1, 0.0, 10.0)]);
        let times = lap_times(&idx);
        assert_eq!(times.len(), 3);
        assert_eq!(times[2].vehicle_id, "b");
    }
}
