//! Station observations
//!
//! The wide-area weather-station network feed (§6, consumed). Only the
//! fields the core uses are modeled here; temperature/humidity/pressure/
//! wind are accepted by the feed but unused by the core and therefore not
//! represented.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single station's latest observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Precipitation depth over the reporting interval (mm). Floored to 0.
    pub precipitation: f64,
    /// Rainfall intensity (mm/h). Floored to 0.
    pub intensity: f64,
    pub online: bool,
    pub timestamp: DateTime<Utc>,
}

impl Station {
    /// Build a station observation, flooring precipitation/intensity to 0
    /// as the feed contract requires.
    pub fn new(
        id: String,
        lat: f64,
        lon: f64,
        altitude: Option<f64>,
        precipitation: f64,
        intensity: f64,
        online: bool,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            lat,
            lon,
            altitude,
            precipitation: precipitation.max(0.0),
            intensity: intensity.max(0.0),
            online,
            timestamp,
        }
    }

    /// Stations reporting `(0, 0)` are discarded by the feed contract (§6)
    /// — treated as a sentinel for "no fix" rather than the real point at
    /// the equator/prime meridian.
    pub fn has_valid_coordinates(&self) -> bool {
        !(self.lat == 0.0 && self.lon == 0.0) && self.lat.is_finite() && self.lon.is_finite()
    }
}

/// The latest-observation-per-id map the scraper would otherwise mutate in
/// place. Built fresh each cycle and handed to the pipeline; later
/// observations for the same id replace earlier ones (§6).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StationMap {
    stations: HashMap<String, Station>,
}

impl StationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an observation. Stations with invalid coordinates
    /// are silently discarded, matching the feed contract.
    pub fn insert(&mut self, station: Station) {
        if station.has_valid_coordinates() {
            self.stations.insert(station.id.clone(), station);
        }
    }

    pub fn from_observations(observations: impl IntoIterator<Item = Station>) -> Self {
        let mut map = Self::new();
        for obs in observations {
            map.insert(obs);
        }
        map
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Online stations within `bounds`.
    pub fn online_within(&self, bounds: &crate::geodesy::Bounds) -> Vec<&Station> {
        self.stations
            .values()
            .filter(|s| s.online && bounds.contains(s.lat, s.lon))
            .collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }
}

/// Flat CSV record mirrored from the station feed, for offline/batch runs
/// via the CLI — one row per station.
#[derive(Debug, Deserialize)]
pub struct StationCsvRecord {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub altitude: Option<f64>,
    pub precipitation: f64,
    pub intensity: f64,
    pub online: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<StationCsvRecord> for Station {
    fn from(r: StationCsvRecord) -> Self {
        Station::new(
            r.id,
            r.lat,
            r.lon,
            r.altitude,
            r.precipitation,
            r.intensity,
            r.online,
            r.timestamp,
        )
    }
}
