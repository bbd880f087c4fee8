//! Inverse-distance-weighted interpolation
//!
//! A single tagged record (`WeightedSample`) stands in for the
//! polymorphic "anything with a lat/lon/value" records the original system
//! duck-types over (§9 design notes) — stations, radar pixels, and bias
//! samples all get adapted into this type at their call sites rather than
//! IDW reflecting over field names.

use crate::geodesy::{haversine_km, COINCIDENT_KM};
use serde::{Deserialize, Serialize};

/// Fixed IDW power exponent (§4.2).
pub const POWER: f64 = 2.0;

/// Fixed IDW search radius in kilometers (§4.2).
pub const SEARCH_RADIUS_KM: f64 = 50.0;

/// A sample point carrying a single scalar field value, used as the
/// common currency for every IDW call site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightedSample {
    pub lat: f64,
    pub lon: f64,
    pub value: f64,
}

impl WeightedSample {
    pub fn new(lat: f64, lon: f64, value: f64) -> Self {
        Self { lat, lon, value }
    }
}

/// Estimate the scalar field at `(lat, lon)` from `samples` using
/// inverse-distance weighting with the fixed power/radius above.
///
/// Iteration order matches `samples`' order: if more than one sample is
/// within `COINCIDENT_KM`, the first encountered wins (§4.2 — tests must
/// not depend on which colocated sample is chosen).
pub fn interpolate(lat: f64, lon: f64, samples: &[WeightedSample]) -> f64 {
    for s in samples {
        if haversine_km(lat, lon, s.lat, s.lon) < COINCIDENT_KM {
            return s.value;
        }
    }

    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for s in samples {
        let d = haversine_km(lat, lon, s.lat, s.lon);
        if d <= SEARCH_RADIUS_KM {
            let w = 1.0 / d.powf(POWER);
            weighted_sum += w * s.value;
            weight_sum += w;
        }
    }

    if weight_sum > 0.0 {
        weighted_sum / weight_sum
    } else {
        0.0
    }
}
