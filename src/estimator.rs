//! Per-subcatchment rainfall estimator
//!
//! Combines gauge and radar observations into a mean-precipitation /
//! max-intensity pair for every subcatchment in a basin, then rolls those
//! up into a basin-level area-weighted estimate (§4.8).

use crate::basin::{Basin, Subcatchment};
use crate::idw::WeightedSample;
use crate::merge::merge;
use crate::radar::RadarGrid;
use crate::station::StationMap;
use serde::{Deserialize, Serialize};

/// Basin-level gauge search margin (degrees).
const BASIN_GAUGE_MARGIN_DEG: f64 = 0.15;
/// Subcatchment-level gauge search margin (degrees).
const SUBCATCHMENT_GAUGE_MARGIN_DEG: f64 = 0.08;

/// Which data sources contributed to a subcatchment's rainfall estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Method {
    NoData,
    RadarOnly,
    DistributedIdw,
    DistributedFusion,
}

/// The rainfall estimate for one subcatchment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubcatchmentRainfall {
    pub subcatchment_id: String,
    pub precip_mm: f64,
    pub intensity_mm_h: f64,
    pub method: Method,
    pub gauge_count: usize,
    pub radar_count: usize,
}

/// The rolled-up basin estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BasinRainfall {
    pub mean_precip_mm: f64,
    pub max_intensity_mm_h: f64,
    pub per_subcatchment: Vec<SubcatchmentRainfall>,
}

fn estimate_region(
    bounds: &crate::geodesy::Bounds,
    gauges: &[WeightedSample],
    radar_samples: &[crate::radar::RadarPixel],
) -> (f64, f64, Method) {
    let method = match (gauges.is_empty(), radar_samples.is_empty()) {
        (false, false) => Method::DistributedFusion,
        (false, true) => Method::DistributedIdw,
        (true, false) => Method::RadarOnly,
        (true, true) => Method::NoData,
    };
    let result = merge(bounds, gauges, radar_samples);
    (result.mean, result.max, method)
}

/// Estimate rainfall for every subcatchment in `basin`, falling back to a
/// single-region estimate over the whole basin when it has none (§4.8).
pub fn estimate_basin_rainfall(basin: &Basin, stations: &StationMap, radar: Option<&RadarGrid>) -> BasinRainfall {
    let basin_gauge_bounds = basin.bounds.expanded(BASIN_GAUGE_MARGIN_DEG);
    let basin_gauges: Vec<WeightedSample> = stations
        .online_within(&basin_gauge_bounds)
        .into_iter()
        .map(|s| WeightedSample::new(s.lat, s.lon, s.precipitation))
        .collect();
    let basin_radar_pixels = radar.map(|g| g.filtered(&basin.bounds)).unwrap_or_default();

    if basin.subcatchments.is_empty() {
        let (precip, intensity, method) = estimate_region(&basin.bounds, &basin_gauges, &basin_radar_pixels);
        let whole_basin = SubcatchmentRainfall {
            subcatchment_id: basin.id.clone(),
            precip_mm: precip,
            intensity_mm_h: intensity,
            method,
            gauge_count: basin_gauges.len(),
            radar_count: basin_radar_pixels.len(),
        };
        return BasinRainfall {
            mean_precip_mm: precip,
            max_intensity_mm_h: intensity,
            per_subcatchment: vec![whole_basin],
        };
    }

    let mut per_subcatchment = Vec::with_capacity(basin.subcatchments.len());
    let mut weighted_precip_sum = 0.0;
    let mut area_sum = 0.0;
    let mut max_intensity = 0.0_f64;

    for sc in &basin.subcatchments {
        let gauge_bounds = sc.bounds.expanded(SUBCATCHMENT_GAUGE_MARGIN_DEG);
        let sc_gauges: Vec<WeightedSample> = stations
            .online_within(&gauge_bounds)
            .into_iter()
            .map(|s| WeightedSample::new(s.lat, s.lon, s.precipitation))
            .collect();
        let sc_radar = radar.map(|g| g.filtered(&sc.bounds)).unwrap_or_default();

        let (precip, intensity, method) = estimate_region(&sc.bounds, &sc_gauges, &sc_radar);

        weighted_precip_sum += precip * sc.area;
        area_sum += sc.area;
        max_intensity = max_intensity.max(intensity);

        per_subcatchment.push(SubcatchmentRainfall {
            subcatchment_id: sc.id.clone(),
            precip_mm: precip,
            intensity_mm_h: intensity,
            method,
            gauge_count: sc_gauges.len(),
            radar_count: sc_radar.len(),
        });
    }

    let mean_precip = if area_sum > 0.0 { weighted_precip_sum / area_sum } else { 0.0 };

    BasinRainfall {
        mean_precip_mm: mean_precip,
        max_intensity_mm_h: max_intensity,
        per_subcatchment,
    }
}
