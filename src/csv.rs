//! CSV input/output for station feeds and snapshot export
//!
//! Lets the pipeline run against a flat station-observation file for
//! offline/batch use, and export a cycle's results for spreadsheet
//! consumers.
//!
//! # CSV Formats
//!
//! ## Stations CSV
//! Columns: `id`, `lat`, `lon`, `altitude`, `precipitation`, `intensity`,
//! `online`, `timestamp`
//!
//! ## Basin results CSV (export)
//! Columns: `basin_id`, `peak_cms`, `time_to_peak_hours`, `mean_precip_mm`,
//! `max_intensity_mm_h`
//!
//! ## Alerts CSV (export)
//! Columns: `basin_id`, `level`, `message`, `peak_cms`, `precipitation`,
//! `intensity`, `timestamp`

use crate::alert::Alert;
use crate::hydrology::BasinResult;
use crate::station::{Station, StationCsvRecord, StationMap};
use csv::{ReaderBuilder, Writer};
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Parse a station observation feed from a CSV file.
pub fn parse_stations_csv<P: AsRef<Path>>(path: P) -> Result<StationMap, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);

    let mut map = StationMap::new();
    for (line_num, result) in reader.deserialize().enumerate() {
        let record: StationCsvRecord = result.map_err(|e| format!("line {}: {}", line_num + 2, e))?;
        let station: Station = record.into();
        map.insert(station);
    }
    Ok(map)
}

#[derive(Debug, Serialize)]
struct BasinResultCsvRow {
    basin_id: String,
    peak_cms: f64,
    time_to_peak_hours: f64,
    mean_precip_mm: f64,
    max_intensity_mm_h: f64,
}

/// Export per-basin peak-flow results from a cycle to a CSV file.
pub fn write_basin_results_csv<P: AsRef<Path>>(path: P, results: &[BasinResult]) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(path)?;
    for r in results {
        writer.serialize(BasinResultCsvRow {
            basin_id: r.basin_id.clone(),
            peak_cms: r.peak_cms,
            time_to_peak_hours: r.time_to_peak_hours,
            mean_precip_mm: r.rainfall.mean_precip_mm,
            max_intensity_mm_h: r.rainfall.max_intensity_mm_h,
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct AlertCsvRow {
    basin_id: String,
    level: String,
    message: String,
    peak_cms: f64,
    precipitation: f64,
    intensity: f64,
    timestamp: String,
}

/// Export alerts (typically a history's [`crate::alert::History::active`])
/// to a CSV file.
pub fn write_alerts_csv<P: AsRef<Path>>(path: P, alerts: &[&Alert]) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(path)?;
    for a in alerts {
        writer.serialize(AlertCsvRow {
            basin_id: a.basin_id.clone(),
            level: format!("{:?}", a.level).to_lowercase(),
            message: a.message.clone(),
            peak_cms: a.peak_cms,
            precipitation: a.precipitation,
            intensity: a.intensity,
            timestamp: a.timestamp.to_rfc3339(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
