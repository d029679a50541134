//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! Business crates depend on this crate only; reverse dependencies are
//! prohibited.
//!
//! ## Data Model
//! - Long form: `TelemetryEvent` (timestamp, vehicle, channel, value)
//! - Wide form: `VehicleSample` rows inside a `WideTable`, sorted by
//!   `(vehicle_id, timestamp)` with a derived lap number
//! - Engine output: `OvertakeMetrics` / `OvertakeAssessment`, `SectorResult`

mod channel;
mod engine_config;
mod error;
mod overtake;
mod sample;
mod sector;
mod table;
mod vehicle_id;

pub use channel::{Channel, ChannelMatch};
pub use engine_config::*;
pub use error::*;
pub use overtake::*;
pub use sample::VehicleSample;
pub use sector::*;
pub use table::*;
pub use vehicle_id::VehicleId;
