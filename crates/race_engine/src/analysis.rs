//! `RaceAnalysis`: the engine facade consumed by the presentation layer.

use contracts::{
    EngineConfig, LapWindowConfig, OvertakeAssessment, OvertakeMetrics, SectorResult, VehicleId,
    VehicleSample, WideTable,
};
use tracing::{debug, info};

use crate::assessment;
use crate::index::{VehicleIndex, VehicleSeries};
use crate::laps::{self, LapTime};
use crate::lookup;
use crate::overtake::OvertakeEngine;
use crate::sectors;

/// Read-only analysis over one loaded session.
///
/// The vehicle index is built once here; every query afterwards borrows it.
#[derive(Debug, Clone)]
pub struct RaceAnalysis {
    index: VehicleIndex,
    lap_window: LapWindowConfig,
    engine: OvertakeEngine,
}

impl RaceAnalysis {
    /// Build with stock parameters.
    ///
    /// `table` must come from `ingestion` (or keep its guarantee that lap
    /// numbers never decrease within a vehicle's series).
    pub fn new(table: WideTable) -> Self {
        Self::with_config(table, &EngineConfig::default())
    }

    pub fn with_config(table: WideTable, config: &EngineConfig) -> Self {
        let index = VehicleIndex::build(table);
        info!(vehicles = index.len(), "Race analysis ready");
        Self {
            index,
            lap_window: config.laps.clone(),
            engine: OvertakeEngine::new(config.overtake.clone()),
        }
    }

    /// Vehicle ids in deterministic order
    pub fn vehicle_ids(&self) -> impl Iterator<Item = &VehicleId> {
        self.index.vehicle_ids()
    }

    pub fn series(&self, vehicle_id: &str) -> Option<&VehicleSeries> {
        self.index.get(vehicle_id)
    }

    pub fn index(&self) -> &VehicleIndex {
        &self.index
    }

    pub fn engine(&self) -> &OvertakeEngine {
        &self.engine
    }

    /// One lap of one vehicle; empty when either is unknown
    pub fn lap_series(&self, vehicle_id: &str, lap_number: u32) -> &[VehicleSample] {
        match self.index.get(vehicle_id) {
            Some(series) => series.lap(lap_number),
            None => &[],
        }
    }

    pub fn lap_times(&self) -> Vec<LapTime> {
        laps::lap_times(&self.index)
    }

    /// Fastest plausible lap with its elapsed time
    pub fn fastest_lap(&self) -> Option<LapTime> {
        let best = laps::fastest_lap(&self.index, &self.lap_window);
        match &best {
            Some(lap) => debug!(
                vehicle = %lap.vehicle_id,
                lap = lap.lap_number,
                elapsed_s = lap.elapsed_s,
                "Fastest lap"
            ),
            None => debug!("No lap inside the plausibility window"),
        }
        best
    }

    /// `(vehicle_id, lap_number)` of the fastest plausible lap
    pub fn get_fastest_lap(&self) -> Option<(VehicleId, u32)> {
        self.fastest_lap().map(|lap| (lap.vehicle_id, lap.lap_number))
    }

    /// Sample nearest `target_distance_m`, optionally within one lap
    pub fn get_car_state_at_distance(
        &self,
        vehicle_id: &str,
        target_distance_m: f64,
        target_lap: Option<u32>,
    ) -> Option<&VehicleSample> {
        let hit = self
            .index
            .get(vehicle_id)
            .and_then(|series| lookup::state_at_distance(series, target_distance_m, target_lap));
        if hit.is_none() {
            metrics::counter!("race_engineer_lookup_misses_total").increment(1);
        }
        hit
    }

    pub fn analyze_sectors(
        &self,
        hero_lap: &[VehicleSample],
        rival_lap: &[VehicleSample],
    ) -> Option<Vec<SectorResult>> {
        sectors::analyze_sectors(hero_lap, rival_lap)
    }

    pub fn calculate_overtake_metrics(
        &self,
        hero: &VehicleSample,
        rival: &VehicleSample,
    ) -> OvertakeMetrics {
        self.engine.evaluate(hero, rival)
    }

    /// Percent probability and reasons; tolerates a missing sample
    pub fn calculate_overtake_probability(
        &self,
        hero: Option<&VehicleSample>,
        rival: Option<&VehicleSample>,
    ) -> OvertakeAssessment {
        assessment::assess(&self.engine, hero, rival)
    }
}
