//! Vehicle index: one ordered, immutable series per vehicle.
//!
//! Built once from the wide table; every lookup afterwards is a map hit
//! plus a binary search, never a re-partition.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use contracts::{VehicleId, VehicleSample, WideTable};

/// Time-ordered samples of one vehicle
#[derive(Debug, Clone)]
pub struct VehicleSeries {
    vehicle_id: VehicleId,
    samples: Vec<VehicleSample>,
}

impl VehicleSeries {
    pub fn vehicle_id(&self) -> &VehicleId {
        &self.vehicle_id
    }

    #[inline]
    pub fn samples(&self) -> &[VehicleSample] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples of one lap.
    ///
    /// Lap numbers never decrease along a series, so the lap is a contiguous
    /// slice located by two binary searches. Empty if the lap does not exist.
    pub fn lap(&self, lap_number: u32) -> &[VehicleSample] {
        let start = self.samples.partition_point(|s| s.lap_number < lap_number);
        let end = self.samples.partition_point(|s| s.lap_number <= lap_number);
        &self.samples[start..end]
    }

    fn laps_non_decreasing(&self) -> bool {
        self.samples
            .windows(2)
            .all(|w| w[0].lap_number <= w[1].lap_number)
    }

    /// Iterate `(lap_number, samples)` in lap order
    pub fn laps(&self) -> impl Iterator<Item = (u32, &[VehicleSample])> {
        self.samples
            .chunk_by(|a, b| a.lap_number == b.lap_number)
            .map(|chunk| (chunk[0].lap_number, chunk))
    }
}

/// `vehicle_id -> VehicleSeries`, iterated in id order
#[derive(Debug, Clone, Default)]
pub struct VehicleIndex {
    series: BTreeMap<VehicleId, VehicleSeries>,
}

impl VehicleIndex {
    /// Partition a wide table (already sorted by vehicle, then timestamp).
    ///
    /// Lap numbers must not decrease along a vehicle's series, as
    /// `ingestion` guarantees; lap slicing depends on it.
    pub fn build(table: WideTable) -> Self {
        let mut series: BTreeMap<VehicleId, VehicleSeries> = BTreeMap::new();
        for row in table.into_rows() {
            series
                .entry(row.vehicle_id.clone())
                .or_insert_with_key(|id| VehicleSeries {
                    vehicle_id: id.clone(),
                    samples: Vec::new(),
                })
                .samples
                .push(row);
        }
        debug_assert!(
            series.values().all(VehicleSeries::laps_non_decreasing),
            "lap numbers decrease within a vehicle series"
        );
        Self { series }
    }

    /// Vehicle ids in deterministic (lexical) order
    pub fn vehicle_ids(&self) -> impl Iterator<Item = &VehicleId> {
        self.series.keys()
    }

    pub fn get(&self, vehicle_id: &str) -> Option<&VehicleSeries> {
        self.series.get(vehicle_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleSeries> {
        self.series.values()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// `max(timestamp) - min(timestamp)` in seconds; `None` for no samples
pub(crate) fn elapsed_s<'a>(samples: impl IntoIterator<Item = &'a VehicleSample>) -> Option<f64> {
    let mut bounds: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
    for s in samples {
        let ts = s.timestamp;
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(ts), hi.max(ts)),
            None => (ts, ts),
        });
    }
    bounds.map(|(lo, hi)| {
        let span = hi - lo;
        span.num_seconds() as f64 + f64::from(span.subsec_nanos()) * 1e-9
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;
    use contracts::Channel;

    pub fn at_ms(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_714_564_800_000 + ms).unwrap()
    }

    /// Sample at `secs` with a lap number and track distance
    pub fn sample(vehicle: &str, secs: f64, lap: u32, dist: f64) -> VehicleSample {
        let mut s = VehicleSample::new(vehicle, at_ms((secs * 1000.0).round() as i64))
            .with(Channel::LapDistance, dist);
        s.lap_number = lap;
        s
    }
}
