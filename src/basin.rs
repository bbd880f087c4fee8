//! Basin catalogue: subcatchments, routing parameters, and basins
//!
//! The basin catalogue is a declarative file (§6) loaded once and held
//! immutable for the life of the process. A subcatchment routes to a
//! channel-routed basin outlet rather than a single storm-sewer inlet.

use crate::error::{CoreError, CoreResult};
use crate::geodesy::Bounds;
use serde::{Deserialize, Serialize};

/// Muskingum routing parameters describing the channel path from a
/// subcatchment to the basin outlet (§3).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RoutingParams {
    /// Travel time constant (hours).
    pub k: f64,
    /// Weighting factor, 0 <= x <= 0.5.
    pub x: f64,
    /// Number of reaches the routing is applied over, in series.
    pub reaches: u32,
}

/// A subcatchment within a basin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subcatchment {
    pub id: String,
    /// Area in km^2.
    pub area: f64,
    /// SCS curve number, nominally in [30, 100].
    pub cn: f64,
    /// Average slope, percent.
    pub slope: f64,
    /// Main-channel length (km), optional — derived from area if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_km: Option<f64>,
    /// Time of concentration (hours), optional — derived via Témez if
    /// absent (§4.3).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tc_hours: Option<f64>,
    /// Clark storage coefficient (hours), optional — defaults to 0.7*tc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_coefficient: Option<f64>,
    pub bounds: Bounds,
    /// Routing to the basin outlet; absent means direct discharge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingParams>,
}

impl Subcatchment {
    /// Validate the unphysical-parameter invariants (§7). Degraded-input
    /// cases (missing tc/L/R) are handled downstream by `tc_temez` and the
    /// Clark module, not here.
    pub fn validate(&self) -> CoreResult<()> {
        if !(30.0..=100.0).contains(&self.cn) {
            return Err(CoreError::CurveNumberOutOfRange(self.id.clone(), self.cn));
        }
        if self.area <= 0.0 {
            return Err(CoreError::NonPositiveArea(self.id.clone(), self.area));
        }
        if let Some(r) = self.routing {
            if !(0.0..=0.5).contains(&r.x) {
                return Err(CoreError::MuskingumXOutOfRange(self.id.clone(), r.x));
            }
            if r.k <= 0.0 {
                return Err(CoreError::NonPositiveMuskingumK(self.id.clone(), r.k));
            }
            if r.reaches < 1 {
                return Err(CoreError::ReachesLessThanOne(self.id.clone(), r.reaches));
            }
        }
        Ok(())
    }
}

/// Alert flow thresholds in m^3/s, strictly increasing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Thresholds {
    pub yellow: f64,
    pub orange: f64,
    pub red: f64,
}

impl Thresholds {
    pub fn validate(&self, basin_id: &str) -> CoreResult<()> {
        if !(self.yellow < self.orange && self.orange < self.red) {
            return Err(CoreError::ThresholdsNotIncreasing(
                basin_id.to_string(),
                self.yellow,
                self.orange,
                self.red,
            ));
        }
        Ok(())
    }
}

/// A hydrographic basin: an ordered list of subcatchments draining to a
/// single outlet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Basin {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub basin_type: String,
    /// Area in km^2. Not required to equal the sum of subcatchment areas
    /// (§9 open question) — callers may warn but the core does not.
    pub area: f64,
    pub bounds: Bounds,
    pub outlet_lat: f64,
    pub outlet_lon: f64,
    pub thresholds: Thresholds,
    pub subcatchments: Vec<Subcatchment>,
}

impl Basin {
    /// Validate this basin and every subcatchment it owns. The first
    /// failure encountered is returned; callers (the cycle coordinator)
    /// record it and move on to the next basin rather than aborting.
    pub fn validate(&self) -> CoreResult<()> {
        self.thresholds.validate(&self.id)?;
        for sc in &self.subcatchments {
            sc.validate()?;
        }
        Ok(())
    }
}

/// The full set of basins, loaded once from a declarative JSON file and
/// held immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BasinCatalogue {
    pub basins: Vec<Basin>,
}

impl BasinCatalogue {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn find(&self, id: &str) -> Option<&Basin> {
        self.basins.iter().find(|b| b.id == id)
    }
}
