//! Sector timing between two laps.

use contracts::{SectorResult, VehicleSample};

use crate::index::elapsed_s;

/// Number of equal-distance sectors per lap
pub const SECTOR_COUNT: u8 = 3;

/// Split the hero lap into equal-distance sectors and time both cars in each.
///
/// Sector bounds come from the hero's maximum distance and apply to both
/// laps as half-open ranges `[start, end)`. A sector missing samples on
/// either side is omitted. `None` if either lap is empty.
pub fn analyze_sectors(hero: &[VehicleSample], rival: &[VehicleSample]) -> Option<Vec<SectorResult>> {
    if hero.is_empty() || rival.is_empty() {
        return None;
    }

    let Some(max_dist) = hero
        .iter()
        .filter_map(VehicleSample::distance)
        .reduce(f64::max)
    else {
        return Some(Vec::new());
    };
    let sector_len = max_dist / f64::from(SECTOR_COUNT);

    let results = (0..SECTOR_COUNT)
        .filter_map(|i| {
            let start = f64::from(i) * sector_len;
            let end = start + sector_len;
            let in_sector = move |s: &&VehicleSample| s.distance().is_some_and(|d| d >= start && d < end);

            let hero_time_s = elapsed_s(hero.iter().filter(in_sector))?;
            let rival_time_s = elapsed_s(rival.iter().filter(in_sector))?;
            Some(SectorResult {
                sector_index: i + 1,
                hero_time_s,
                rival_time_s,
                delta_s: hero_time_s - rival_time_s,
            })
        })
        .collect();
    Some(results)
}
