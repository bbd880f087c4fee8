//! Semi-distributed basin hydrologic model
//!
//! Orchestrates the per-subcatchment chain (rainfall estimate -> SCS loss ->
//! Clark unit hydrograph -> Muskingum routing) and superposes the routed
//! subcatchment hydrographs into a basin outlet hydrograph. Basins with no
//! subcatchments fall back to a single lumped computation (§4.9).

use crate::basin::Basin;
use crate::estimator::{self, BasinRainfall};
use crate::radar::RadarGrid;
use crate::station::StationMap;
use crate::{clark, loss, rational, routing};
use log::debug;
use serde::{Deserialize, Serialize};

/// Default slope (percent) used by Témez when a subcatchment omits one.
const DEFAULT_SLOPE_PERCENT: f64 = 5.0;

/// Curve number assumed for the lumped basin-level fallback, in the
/// absence of any subcatchment to carry a CN of its own.
const LUMPED_FALLBACK_CN: f64 = 70.0;

/// The modeled response of a single subcatchment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubcatchmentResult {
    pub subcatchment_id: String,
    pub area_km2: f64,
    pub cn: f64,
    /// Local rainfall depth (mm) used to drive this subcatchment (§3 "local P").
    pub precip_mm: f64,
    /// Local rainfall intensity (mm/h) used to drive this subcatchment.
    pub intensity_mm_h: f64,
    pub effective_rainfall_mm: f64,
    pub tc_hours: f64,
    /// Raw Clark peak before Muskingum routing (§3 "raw Clark peak").
    pub raw_peak_cms: f64,
    pub hydrograph_cms: Vec<f64>,
    /// Routed peak, after Muskingum routing if the subcatchment has any
    /// (§3 "routed peak"); equal to `raw_peak_cms` when there is none.
    pub peak_cms: f64,
    pub rational_check_cms: f64,
}

/// Whether a basin was modeled subcatchment-by-subcatchment or via the
/// single-region lumped fallback (§3, §4.9).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BasinMethod {
    Lumped,
    SemiDistributed,
}

/// The modeled response of a whole basin: the superposed outlet hydrograph
/// plus each contributing subcatchment's own result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BasinResult {
    pub basin_id: String,
    pub method: BasinMethod,
    pub dt_hours: f64,
    pub rainfall: BasinRainfall,
    pub subcatchments: Vec<SubcatchmentResult>,
    pub outlet_hydrograph_cms: Vec<f64>,
    pub peak_cms: f64,
    pub time_to_peak_hours: f64,
}

/// Sum hydrographs of differing lengths, padding the shorter ones with
/// zero (§4.9 superposition).
fn superpose(hydrographs: &[Vec<f64>]) -> Vec<f64> {
    let max_len = hydrographs.iter().map(|h| h.len()).max().unwrap_or(0);
    let mut total = vec![0.0; max_len];
    for h in hydrographs {
        for (i, &v) in h.iter().enumerate() {
            total[i] += v;
        }
    }
    total
}

fn peak_and_time(ordinates: &[f64], dt_hours: f64) -> (f64, f64) {
    match ordinates.iter().enumerate().max_by(|a, b| a.1.partial_cmp(b.1).unwrap()) {
        Some((idx, &peak)) => (peak, (idx + 1) as f64 * dt_hours),
        None => (0.0, 0.0),
    }
}

const HYDROGRAPH_DT_HOURS: f64 = 0.25;

/// Model a single subcatchment's response given its already-estimated
/// rainfall.
fn model_subcatchment(
    basin_id: &str,
    sc: &crate::basin::Subcatchment,
    precip_mm: f64,
    intensity_mm_h: f64,
) -> SubcatchmentResult {
    let tc = loss::resolve_tc_hours(sc.tc_hours, sc.length_km, sc.area, sc.slope);
    let pe = loss::effective_rainfall_mm(precip_mm, sc.cn);
    let hydrograph = clark::direct_runoff_hydrograph(sc.area, pe, tc, sc.storage_coefficient);
    let raw_peak = hydrograph.peak_cms;

    let routed = match sc.routing {
        Some(r) => routing::route_reaches(&hydrograph.ordinates, r.k, r.x, r.reaches, basin_id),
        None => hydrograph.ordinates,
    };

    let (peak, _time) = peak_and_time(&routed, HYDROGRAPH_DT_HOURS);
    let rational_check = rational::peak_flow_subcatchment_cms(sc.cn, intensity_mm_h, sc.area);

    debug!("basin {basin_id} subcatchment {}: pe={pe:.2}mm tc={tc:.2}h peak={peak:.2}cms", sc.id);

    SubcatchmentResult {
        subcatchment_id: sc.id.clone(),
        area_km2: sc.area,
        cn: sc.cn,
        precip_mm,
        intensity_mm_h,
        effective_rainfall_mm: pe,
        tc_hours: tc,
        raw_peak_cms: raw_peak,
        hydrograph_cms: routed,
        peak_cms: peak,
        rational_check_cms: rational_check,
    }
}

/// Model a basin's lumped fallback when it has no subcatchments (§4.9).
fn model_lumped(basin: &Basin, rainfall: &BasinRainfall) -> SubcatchmentResult {
    let tc = loss::resolve_tc_hours(None, None, basin.area, DEFAULT_SLOPE_PERCENT);
    let pe = loss::effective_rainfall_mm(rainfall.mean_precip_mm, LUMPED_FALLBACK_CN);
    let hydrograph = clark::direct_runoff_hydrograph(basin.area, pe, tc, None);
    let (peak, _time) = peak_and_time(&hydrograph.ordinates, HYDROGRAPH_DT_HOURS);
    let rational_check = rational::peak_flow_lumped_cms(LUMPED_FALLBACK_CN, rainfall.max_intensity_mm_h, basin.area);

    SubcatchmentResult {
        subcatchment_id: basin.id.clone(),
        area_km2: basin.area,
        cn: LUMPED_FALLBACK_CN,
        precip_mm: rainfall.mean_precip_mm,
        intensity_mm_h: rainfall.max_intensity_mm_h,
        effective_rainfall_mm: pe,
        tc_hours: tc,
        raw_peak_cms: hydrograph.peak_cms,
        hydrograph_cms: hydrograph.ordinates,
        peak_cms: peak,
        rational_check_cms: rational_check,
    }
}

/// Model a basin end-to-end: estimate rainfall, run each subcatchment's
/// loss/Clark/Muskingum chain, and superpose the results into an outlet
/// hydrograph.
pub fn model_basin(basin: &Basin, stations: &StationMap, radar: Option<&RadarGrid>) -> BasinResult {
    let rainfall = estimator::estimate_basin_rainfall(basin, stations, radar);

    let method = if basin.subcatchments.is_empty() { BasinMethod::Lumped } else { BasinMethod::SemiDistributed };
    let results: Vec<SubcatchmentResult> = if basin.subcatchments.is_empty() {
        vec![model_lumped(basin, &rainfall)]
    } else {
        basin
            .subcatchments
            .iter()
            .zip(rainfall.per_subcatchment.iter())
            .map(|(sc, r)| model_subcatchment(&basin.id, sc, r.precip_mm, r.intensity_mm_h))
            .collect()
    };

    let hydrographs: Vec<Vec<f64>> = results.iter().map(|r| r.hydrograph_cms.clone()).collect();
    let outlet_hydrograph = superpose(&hydrographs);
    let (peak, time_to_peak) = peak_and_time(&outlet_hydrograph, HYDROGRAPH_DT_HOURS);

    BasinResult {
        basin_id: basin.id.clone(),
        method,
        dt_hours: HYDROGRAPH_DT_HOURS,
        rainfall,
        subcatchments: results,
        outlet_hydrograph_cms: outlet_hydrograph,
        peak_cms: peak,
        time_to_peak_hours: time_to_peak,
    }
}
