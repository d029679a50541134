//! Sector timing types.

use serde::{Deserialize, Serialize};

use crate::VehicleId;

/// Timing of one equal-distance sector for a hero/rival lap pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorResult {
    /// Sector number, 1..=3
    pub sector_index: u8,

    /// Hero elapsed time in the sector, seconds
    pub hero_time_s: f64,

    /// Rival elapsed time in the sector, seconds
    pub rival_time_s: f64,

    /// `hero_time_s - rival_time_s`; negative means the hero was faster
    pub delta_s: f64,
}

impl SectorResult {
    pub fn hero_faster(&self) -> bool {
        self.delta_s < 0.0
    }
}

/// Full identity of a sector comparison, for caller-side caching
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorKey {
    pub hero_id: VehicleId,
    pub hero_lap: u32,
    pub rival_id: VehicleId,
    pub rival_lap: u32,
}
