//! Long-format CSV reader
//!
//! Resolves the identifying columns (with header aliases), keeps rows whose
//! channel the engine consumes and parses their timestamps.

use std::io;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use contracts::{Channel, TelemetryEvent, VehicleId};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{IngestionError, Result};

const TIMESTAMP: &[&str] = &["timestamp"];
const VEHICLE_ID: &[&str] = &["vehicle_id"];
const CHANNEL_NAME: &[&str] = &["channel_name", "telemetry_name"];
const VALUE: &[&str] = &["value", "telemetry_value"];

/// Naive formats accepted when the cell is not RFC 3339; interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Row counts collected while reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Data records in the source
    pub rows_read: u64,
    /// Records on a recognized channel
    pub rows_kept: u64,
}

impl ReadStats {
    pub fn rows_ignored(&self) -> u64 {
        self.rows_read - self.rows_kept
    }
}

/// Header positions of the four long-format columns
#[derive(Debug, Clone, Copy)]
struct Columns {
    timestamp: usize,
    vehicle_id: usize,
    channel_name: usize,
    value: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |candidates: &[&str]| {
            candidates
                .iter()
                .find_map(|name| headers.iter().position(|h| h == *name))
        };

        let timestamp = find(TIMESTAMP);
        let vehicle_id = find(VEHICLE_ID);
        let channel_name = find(CHANNEL_NAME);
        let value = find(VALUE);

        match (timestamp, vehicle_id, channel_name, value) {
            (Some(timestamp), Some(vehicle_id), Some(channel_name), Some(value)) => Ok(Self {
                timestamp,
                vehicle_id,
                channel_name,
                value,
            }),
            _ => {
                let missing = [
                    (timestamp, TIMESTAMP[0]),
                    (vehicle_id, VEHICLE_ID[0]),
                    (channel_name, CHANNEL_NAME[0]),
                    (value, VALUE[0]),
                ]
                .into_iter()
                .filter(|(pos, _)| pos.is_none())
                .map(|(_, name)| name.to_string())
                .collect();
                Err(IngestionError::MissingColumns { missing })
            }
        }
    }

    fn width(&self) -> usize {
        self.timestamp
            .max(self.vehicle_id)
            .max(self.channel_name)
            .max(self.value)
            + 1
    }
}

/// Read a long-format CSV file
pub fn read_path(path: &Path) -> Result<(Vec<TelemetryEvent>, ReadStats)> {
    let source = path.display().to_string();
    let reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestionError::Open {
            path: source.clone(),
            source: e,
        })?;
    read_records(reader, &source)
}

/// Read long-format CSV from any reader; `source` names it in errors
pub fn read_from<R: io::Read>(reader: R, source: &str) -> Result<(Vec<TelemetryEvent>, ReadStats)> {
    let reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    read_records(reader, source)
}

fn read_records<R: io::Read>(
    mut reader: csv::Reader<R>,
    source: &str,
) -> Result<(Vec<TelemetryEvent>, ReadStats)> {
    let record_err = |e| IngestionError::Record {
        path: source.to_string(),
        source: e,
    };

    let headers = reader.headers().map_err(record_err)?.clone();
    let columns = Columns::resolve(&headers)?;
    debug!(source, ?columns, "Resolved telemetry columns");

    let mut stats = ReadStats::default();
    let mut events = Vec::new();
    let mut record = StringRecord::new();

    while reader.read_record(&mut record).map_err(record_err)? {
        stats.rows_read += 1;
        if record.len() < columns.width() {
            continue;
        }

        let channel_name = &record[columns.channel_name];
        if Channel::recognize(channel_name).is_none() {
            continue;
        }

        let raw_ts = &record[columns.timestamp];
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| IngestionError::Timestamp {
            path: source.to_string(),
            line: record.position().map_or(0, |p| p.line()),
            value: raw_ts.to_string(),
        })?;

        stats.rows_kept += 1;
        events.push(TelemetryEvent {
            timestamp,
            vehicle_id: VehicleId::from(&record[columns.vehicle_id]),
            channel_name: channel_name.to_string(),
            value: record[columns.value].to_string(),
        });
    }

    Ok((events, stats))
}

/// Parse a logger timestamp. Offsets are honoured; naive values are UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
