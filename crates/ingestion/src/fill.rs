//! Per-vehicle gap filling: forward fill, then backward fill.

use contracts::{Channel, VehicleSample, WideTable};

/// Fill missing channel values within each vehicle's run.
///
/// A channel stays missing only if the vehicle never reports it.
pub fn fill_per_vehicle(table: &mut WideTable) {
    for run in table.vehicle_runs_mut() {
        for channel in Channel::ALL {
            fill_channel(run, channel);
        }
    }
}

fn fill_channel(run: &mut [VehicleSample], channel: Channel) {
    let mut last = None;
    for row in run.iter_mut() {
        match row.get(channel) {
            Some(v) => last = Some(v),
            None => row.set(channel, last),
        }
    }

    let mut next = None;
    for row in run.iter_mut().rev() {
        match row.get(channel) {
            Some(v) => next = Some(v),
            None => row.set(channel, next),
        }
    }
}
