//! VehicleSample - one wide-table row
//!
//! One vehicle at one timestamp, every recognized channel in its own slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Channel, VehicleId};

/// Wide-form telemetry sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSample {
    /// Logger timestamp
    pub timestamp: DateTime<Utc>,

    /// Owning vehicle
    pub vehicle_id: VehicleId,

    /// Lap number derived from distance resets (1-based)
    pub lap_number: u32,

    /// Channel values indexed by `Channel::index()`; `None` = missing
    values: [Option<f64>; Channel::COUNT],
}

impl VehicleSample {
    /// Create an empty sample (all channels missing, lap 1)
    pub fn new(vehicle_id: impl Into<VehicleId>, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            vehicle_id: vehicle_id.into(),
            lap_number: 1,
            values: [None; Channel::COUNT],
        }
    }

    /// Builder-style channel setter
    pub fn with(mut self, channel: Channel, value: f64) -> Self {
        self.set(channel, Some(value));
        self
    }

    /// Raw channel value. NaN is reported as missing.
    #[inline]
    pub fn get(&self, channel: Channel) -> Option<f64> {
        self.values[channel.index()].filter(|v| !v.is_nan())
    }

    /// Channel value, or `default` when missing.
    ///
    /// This is the engine's only field accessor: a lossy live feed must
    /// never abort a frame.
    #[inline]
    pub fn get_or(&self, channel: Channel, default: f64) -> f64 {
        self.get(channel).unwrap_or(default)
    }

    #[inline]
    pub fn set(&mut self, channel: Channel, value: Option<f64>) {
        self.values[channel.index()] = value;
    }

    /// Track distance, if reported
    #[inline]
    pub fn distance(&self) -> Option<f64> {
        self.get(Channel::LapDistance)
    }

    /// Iterate `(channel, value)` over present channels
    pub fn present(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        Channel::ALL
            .iter()
            .filter_map(move |&c| self.get(c).map(|v| (c, v)))
    }
}
