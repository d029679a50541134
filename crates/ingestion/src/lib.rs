//! # Ingestion
//!
//! Long-format telemetry CSV -> wide, gap-filled, lap-numbered `WideTable`.
//!
//! Responsibilities:
//! - Read the CSV, resolving header aliases and keeping recognized channels
//! - Pivot to one row per `(vehicle_id, timestamp)` (first duplicate wins)
//! - Forward/backward fill each vehicle's channels independently
//! - Number laps from track-distance resets
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! let table = ingestion::load(Path::new("session.csv")).unwrap();
//! println!("{} samples across {} vehicles", table.len(), table.vehicle_ids().len());
//! ```

mod error;
mod fill;
mod laps;
mod pivot;
mod reader;

use std::path::Path;

use contracts::{ContractError, IngestionConfig, TelemetryEvent, WideTable};
use metrics::{counter, gauge};
use tracing::{info, instrument};

pub use error::{IngestionError, Result};
pub use fill::fill_per_vehicle;
pub use laps::derive_lap_numbers;
pub use pivot::{coerce, pivot, PivotStats};
pub use reader::{parse_timestamp, read_from, read_path, ReadStats};

/// Summary of one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionReport {
    pub read: ReadStats,
    pub pivot: PivotStats,
    pub samples: usize,
    pub vehicles: usize,
}

/// Load a session with default settings
pub fn load(path: &Path) -> std::result::Result<WideTable, ContractError> {
    load_with_config(path, &IngestionConfig::default()).map(|(table, _)| table)
}

/// Load a session, returning the table and a load report
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_with_config(
    path: &Path,
    config: &IngestionConfig,
) -> std::result::Result<(WideTable, IngestionReport), ContractError> {
    let (events, read) = reader::read_path(path)?;

    counter!("race_engineer_rows_read_total").increment(read.rows_read);
    counter!("race_engineer_rows_kept_total").increment(read.rows_kept);
    counter!("race_engineer_rows_ignored_total").increment(read.rows_ignored());

    let (table, pivot) = pivot_events(&events, config);
    let report = IngestionReport {
        read,
        pivot,
        samples: table.len(),
        vehicles: table.vehicle_ids().len(),
    };

    gauge!("race_engineer_vehicles_loaded").set(report.vehicles as f64);
    info!(
        rows_read = read.rows_read,
        rows_kept = read.rows_kept,
        samples = report.samples,
        vehicles = report.vehicles,
        "Telemetry loaded"
    );

    Ok((table, report))
}

/// Pivot, fill and lap-number already-parsed events.
///
/// Also used to re-pivot a melted table.
pub fn pivot_events(events: &[TelemetryEvent], config: &IngestionConfig) -> (WideTable, PivotStats) {
    let (mut table, stats) = pivot::pivot(events);
    fill::fill_per_vehicle(&mut table);
    laps::derive_lap_numbers(&mut table, config.lap_reset_threshold_m);

    if stats.duplicates > 0 {
        counter!("race_engineer_duplicate_cells_total").increment(stats.duplicates);
    }
    if stats.unparsable > 0 {
        counter!("race_engineer_unparsable_values_total").increment(stats.unparsable);
    }
    (table, stats)
}
