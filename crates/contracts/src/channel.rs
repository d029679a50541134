//! Telemetry channels recognized by the ingestion pipeline.
//!
//! The logger emits many more channels than the engine consumes; only the
//! ones listed here survive the long -> wide pivot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical wide-table channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    /// Vehicle speed, km/h
    Speed,
    /// Longitudinal acceleration, G (negative = braking)
    AccelX,
    /// Lateral acceleration, G
    AccelY,
    /// Accelerator pedal position, percent
    Throttle,
    /// Front brake pressure, bar
    BrakeFront,
    /// Rear brake pressure, bar
    BrakeRear,
    /// Steering wheel angle, degrees
    SteeringAngle,
    /// Distance since the lap trigger, meters
    LapDistance,
    /// GPS latitude
    Latitude,
    /// GPS longitude
    Longitude,
}

impl Channel {
    /// Number of channels (size of a sample's value array)
    pub const COUNT: usize = 10;

    /// All channels in column order
    pub const ALL: [Channel; Self::COUNT] = [
        Channel::Speed,
        Channel::AccelX,
        Channel::AccelY,
        Channel::Throttle,
        Channel::BrakeFront,
        Channel::BrakeRear,
        Channel::SteeringAngle,
        Channel::LapDistance,
        Channel::Latitude,
        Channel::Longitude,
    ];

    /// Column index inside a sample
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical channel name as written by the logger
    pub fn name(self) -> &'static str {
        match self {
            Channel::Speed => "Speed",
            Channel::AccelX => "accx_can",
            Channel::AccelY => "accy_can",
            Channel::Throttle => "aps",
            Channel::BrakeFront => "pbrake_f",
            Channel::BrakeRear => "pbrake_r",
            Channel::SteeringAngle => "Steering_Angle",
            Channel::LapDistance => "Laptrigger_lapdist_dls",
            Channel::Latitude => "VBOX_Lat_Min",
            Channel::Longitude => "VBOX_Long_Min",
        }
    }

    /// Resolve a raw channel name from the long-format source.
    ///
    /// Returns `None` for channels the engine does not consume.
    pub fn recognize(raw: &str) -> Option<ChannelMatch> {
        let matched = match raw {
            "Speed" => ChannelMatch::Direct(Channel::Speed),
            "speed" => ChannelMatch::LowercaseSpeed,
            "accx_can" => ChannelMatch::Direct(Channel::AccelX),
            "accy_can" => ChannelMatch::Direct(Channel::AccelY),
            "aps" => ChannelMatch::Direct(Channel::Throttle),
            "pbrake_f" => ChannelMatch::Direct(Channel::BrakeFront),
            "pbrake_r" => ChannelMatch::Direct(Channel::BrakeRear),
            "Steering_Angle" => ChannelMatch::Direct(Channel::SteeringAngle),
            "Laptrigger_lapdist_dls" => ChannelMatch::Direct(Channel::LapDistance),
            "VBOX_Lat_Min" => ChannelMatch::Direct(Channel::Latitude),
            // Older loggers spell it out; renamed before the pivot.
            "VBOX_Long_Minutes" | "VBOX_Long_Min" => ChannelMatch::Direct(Channel::Longitude),
            _ => return None,
        };
        Some(matched)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of recognizing a raw channel name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMatch {
    /// Maps directly onto a canonical channel
    Direct(Channel),
    /// Lower-case `speed`; only used as `Speed` when the source has no `Speed` rows
    LowercaseSpeed,
}
