//! Long and wide telemetry tables.
//!
//! - `TelemetryEvent`: one long-format row as read from the source file
//! - `WideTable`: pivoted rows sorted by (vehicle_id, timestamp)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Channel, VehicleId, VehicleSample};

/// Long-format telemetry row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Logger timestamp
    pub timestamp: DateTime<Utc>,

    /// Reporting vehicle
    pub vehicle_id: VehicleId,

    /// Raw channel name (unfiltered)
    pub channel_name: String,

    /// Raw value; numeric coercion happens during the pivot
    pub value: String,
}

/// Pivoted per-vehicle-per-timestamp table.
///
/// Rows are sorted by `(vehicle_id, timestamp)` and each vehicle's run is
/// contiguous.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WideTable {
    rows: Vec<VehicleSample>,
}

impl WideTable {
    /// Build a table from rows, sorting them by `(vehicle_id, timestamp)`.
    pub fn from_rows(mut rows: Vec<VehicleSample>) -> Self {
        rows.sort_by(|a, b| {
            a.vehicle_id
                .cmp(&b.vehicle_id)
                .then_with(|| a.timestamp.cmp(&b.timestamp))
        });
        Self { rows }
    }

    #[inline]
    pub fn rows(&self) -> &[VehicleSample] {
        &self.rows
    }

    #[inline]
    pub fn rows_mut(&mut self) -> &mut [VehicleSample] {
        &mut self.rows
    }

    pub fn into_rows(self) -> Vec<VehicleSample> {
        self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Vehicle ids in table order (sorted, deduplicated)
    pub fn vehicle_ids(&self) -> Vec<VehicleId> {
        let mut ids: Vec<VehicleId> = Vec::new();
        for row in &self.rows {
            if ids.last() != Some(&row.vehicle_id) {
                ids.push(row.vehicle_id.clone());
            }
        }
        ids
    }

    /// Contiguous row ranges, one per vehicle, in table order
    pub fn vehicle_runs(&self) -> impl Iterator<Item = &[VehicleSample]> {
        self.rows
            .chunk_by(|a, b| a.vehicle_id == b.vehicle_id)
    }

    /// Mutable variant of [`WideTable::vehicle_runs`]
    pub fn vehicle_runs_mut(&mut self) -> impl Iterator<Item = &mut [VehicleSample]> {
        self.rows
            .chunk_by_mut(|a, b| a.vehicle_id == b.vehicle_id)
    }

    /// Whether any row reports `channel`
    pub fn has_channel(&self, channel: Channel) -> bool {
        self.rows.iter().any(|r| r.get(channel).is_some())
    }

    /// Convert back to long form, one event per present channel value.
    ///
    /// Lap numbers are not emitted; they are always re-derived.
    pub fn melt(&self) -> Vec<TelemetryEvent> {
        self.rows
            .iter()
            .flat_map(|row| {
                row.present().map(move |(channel, value)| TelemetryEvent {
                    timestamp: row.timestamp,
                    vehicle_id: row.vehicle_id.clone(),
                    channel_name: channel.name().to_string(),
                    value: value.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_from_rows_sorts_by_vehicle_then_time() {
        let table = WideTable::from_rows(vec![
            VehicleSample::new("b", at(1)),
            VehicleSample::new("a", at(2)),
            VehicleSample::new("a", at(1)),
        ]);

        let order: Vec<(&str, i64)> = table
            .rows()
            .iter()
            .map(|r| (r.vehicle_id.as_str(), r.timestamp.timestamp()))
            .collect();
        assert_eq!(order, vec![("a", 1), ("a", 2), ("b", 1)]);
        assert_eq!(table.vehicle_ids(), vec![VehicleId::from("a"), VehicleId::from("b")]);
    }

    #[test]
    fn test_vehicle_runs_are_contiguous() {
        let table = WideTable::from_rows(vec![
            VehicleSample::new("a", at(1)),
            VehicleSample::new("b", at(1)),
            VehicleSample::new("a", at(2)),
        ]);
        let lens: Vec<usize> = table.vehicle_runs().map(|r| r.len()).collect();
        assert_eq!(lens, vec![2, 1]);
    }

    #[test]
    fn test_melt_emits_present_channels_only() {
        let table = WideTable::from_rows(vec![VehicleSample::new("a", at(1))
            .with(Channel::Speed, 101.5)
            .with(Channel::LapDistance, 12.0)]);

        let events = table.melt();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].channel_name, "Speed");
        assert_eq!(events[0].value, "101.5");
        assert_eq!(events[1].channel_name, "Laptrigger_lapdist_dls");
        assert!(table.has_channel(Channel::Speed));
        assert!(!table.has_channel(Channel::Throttle));
    }
}
