//! Geodesy primitives
//!
//! Great-circle distance and the rectangular bounds shared by station,
//! radar, and subcatchment filtering.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for the haversine formula (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distances below this are treated as coincident by the IDW colocation
/// shortcut (§4.2).
pub const COINCIDENT_KM: f64 = 0.01;

/// Great-circle distance between two (latitude, longitude) points in
/// decimal degrees, in kilometers.
///
/// Uses the numerically stable `atan2(sqrt(a), sqrt(1-a))` form rather than
/// `asin(sqrt(a))`, which loses precision as `a` approaches 1.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// A rectangular lat/lon bounding box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// Whether `(lat, lon)` falls within the box (inclusive).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.south && lat <= self.north && lon >= self.west && lon <= self.east
    }

    /// Returns a copy of these bounds expanded outward by `margin_deg` on
    /// every side (used for the basin 0.15° and subcatchment 0.08° gauge
    /// search margins of §4.8).
    pub fn expanded(&self, margin_deg: f64) -> Bounds {
        Bounds {
            north: self.north + margin_deg,
            south: self.south - margin_deg,
            east: self.east + margin_deg,
            west: self.west - margin_deg,
        }
    }

    /// Center point of the box.
    pub fn center(&self) -> (f64, f64) {
        ((self.north + self.south) / 2.0, (self.east + self.west) / 2.0)
    }
}
