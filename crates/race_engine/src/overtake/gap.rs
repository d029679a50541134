//! Spatial gap between two cars.

use contracts::{Channel, OvertakeConfig, VehicleSample};

/// Mean Earth radius, meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Where a gap estimate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapSource {
    TrackDistance,
    Gps,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapEstimate {
    pub gap_m: f64,
    pub source: GapSource,
}

/// Gap in meters, by priority: track distance, GPS, fixed default.
///
/// Track distance is trusted only when both cars report a non-negative
/// value and the difference is under `max_track_gap_m`; larger differences
/// are treated as start/finish wraparound. A zero latitude on either car
/// marks GPS as unavailable.
pub fn estimate_gap(hero: &VehicleSample, rival: &VehicleSample, config: &OvertakeConfig) -> GapEstimate {
    let hero_dist = hero.get_or(Channel::LapDistance, -1.0);
    let rival_dist = rival.get_or(Channel::LapDistance, -1.0);

    if hero_dist >= 0.0 && rival_dist >= 0.0 {
        let diff = (hero_dist - rival_dist).abs();
        if diff < config.max_track_gap_m {
            return GapEstimate {
                gap_m: diff,
                source: GapSource::TrackDistance,
            };
        }
    }

    let lat1 = hero.get_or(Channel::Latitude, 0.0);
    let lon1 = hero.get_or(Channel::Longitude, 0.0);
    let lat2 = rival.get_or(Channel::Latitude, 0.0);
    let lon2 = rival.get_or(Channel::Longitude, 0.0);

    if lat1 != 0.0 && lat2 != 0.0 {
        GapEstimate {
            gap_m: haversine_m(lat1, lon1, lat2, lon2),
            source: GapSource::Gps,
        }
    } else {
        GapEstimate {
            gap_m: config.default_gap_m,
            source: GapSource::Default,
        }
    }
}

/// Great-circle distance between two fixes in decimal degrees, meters
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}
