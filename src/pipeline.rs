//! Cycle coordinator
//!
//! Runs one full monitoring cycle: validates and models every basin in
//! parallel, classifies alerts, and assembles the resulting snapshot. A
//! basin that fails validation or modeling is recorded as a failure and
//! excluded from the snapshot rather than aborting the whole cycle (§7).

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::alert::{self, Alert, History};
use crate::basin::BasinCatalogue;
use crate::hydrology::{self, BasinResult};
use crate::radar::RadarGrid;
use crate::snapshot::{BasinFailure, Snapshot};
use crate::station::StationMap;

enum Outcome {
    Modeled(BasinResult, Alert),
    Failed(BasinFailure),
}

fn run_basin(basin: &crate::basin::Basin, stations: &StationMap, radar: Option<&RadarGrid>, now: DateTime<Utc>) -> Outcome {
    if let Err(e) = basin.validate() {
        return Outcome::Failed(BasinFailure { basin_id: basin.id.clone(), message: e.to_string() });
    }

    let result = hydrology::model_basin(basin, stations, radar);
    let precipitation = result.rainfall.mean_precip_mm;
    let intensity = result.rainfall.max_intensity_mm_h;
    let level = alert::classify(result.peak_cms, precipitation, intensity, &basin.thresholds);
    let message = format!(
        "basin {} at {:?}: peak {:.2} m^3/s, precip {:.1} mm, intensity {:.1} mm/h",
        basin.id, level, result.peak_cms, precipitation, intensity
    );
    let alert = Alert {
        basin_id: basin.id.clone(),
        level,
        message,
        peak_cms: result.peak_cms,
        precipitation,
        intensity,
        timestamp: now,
    };
    Outcome::Modeled(result, alert)
}

/// Run one cycle over every basin in `catalogue`, appending raised alerts
/// to `history` and returning the resulting snapshot. Basins are modeled
/// concurrently; `history` is updated serially afterward so it stays
/// consistent regardless of completion order.
pub fn run_cycle(
    catalogue: &BasinCatalogue,
    stations: &StationMap,
    radar: Option<&RadarGrid>,
    history: &mut History,
    now: DateTime<Utc>,
) -> Snapshot {
    let outcomes: Vec<Outcome> =
        catalogue.basins.par_iter().map(|basin| run_basin(basin, stations, radar, now)).collect();

    let mut basin_results = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            Outcome::Modeled(result, alert) => {
                if alert.level != alert::Level::Green {
                    history.push(alert);
                }
                basin_results.push(result);
            }
            Outcome::Failed(failure) => {
                log::warn!("basin {} failed this cycle: {}", failure.basin_id, failure.message);
                failures.push(failure);
            }
        }
    }

    let active_alerts = history.active().into_iter().cloned().collect();

    Snapshot {
        generated_at: now,
        stations: stations.clone(),
        radar: radar.cloned(),
        basin_results,
        active_alerts,
        failures,
    }
}
