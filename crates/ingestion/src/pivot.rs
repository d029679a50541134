//! Long -> wide reshape
//!
//! One row per `(vehicle_id, timestamp)`, one slot per channel. The first
//! occurrence of a `(timestamp, vehicle_id, channel)` triple wins, even when
//! its value later turns out to be unparsable.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use contracts::{Channel, ChannelMatch, TelemetryEvent, VehicleId, VehicleSample, WideTable};
use tracing::debug;

/// Counts collected during the reshape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PivotStats {
    /// Later occurrences of an already-seen triple
    pub duplicates: u64,
    /// Values that did not coerce to a number
    pub unparsable: u64,
    /// Lower-case `speed` values dropped because `Speed` is present
    pub shadowed_speed: u64,
}

struct Slot {
    sample: VehicleSample,
    seen: [bool; Channel::COUNT],
}

/// Reshape long-format events into a wide table (no fill, lap 1 everywhere)
pub fn pivot(events: &[TelemetryEvent]) -> (WideTable, PivotStats) {
    let has_speed = events.iter().any(|e| e.channel_name == Channel::Speed.name());

    let mut stats = PivotStats::default();
    let mut index: HashMap<(VehicleId, DateTime<Utc>), usize> = HashMap::new();
    let mut slots: Vec<Slot> = Vec::new();

    for event in events {
        // A shadowed `speed` still marks the row as present; only its cell is dropped.
        let channel = match Channel::recognize(&event.channel_name) {
            Some(ChannelMatch::Direct(channel)) => Some(channel),
            Some(ChannelMatch::LowercaseSpeed) if !has_speed => Some(Channel::Speed),
            Some(ChannelMatch::LowercaseSpeed) => {
                stats.shadowed_speed += 1;
                None
            }
            None => continue,
        };

        let key = (event.vehicle_id.clone(), event.timestamp);
        let pos = *index.entry(key).or_insert_with(|| {
            slots.push(Slot {
                sample: VehicleSample::new(event.vehicle_id.clone(), event.timestamp),
                seen: [false; Channel::COUNT],
            });
            slots.len() - 1
        });

        let Some(channel) = channel else {
            continue;
        };
        let slot = &mut slots[pos];
        if slot.seen[channel.index()] {
            stats.duplicates += 1;
            continue;
        }
        slot.seen[channel.index()] = true;

        let value = coerce(&event.value);
        if value.is_none() {
            stats.unparsable += 1;
        }
        slot.sample.set(channel, value);
    }

    debug!(
        rows = slots.len(),
        duplicates = stats.duplicates,
        unparsable = stats.unparsable,
        "Pivoted telemetry"
    );

    let rows = slots.into_iter().map(|slot| slot.sample).collect();
    (WideTable::from_rows(rows), stats)
}

/// Numeric coercion; anything unparsable (or NaN) becomes missing
pub fn coerce(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}
