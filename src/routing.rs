//! Muskingum channel routing
//!
//! Routes a subcatchment's direct-runoff hydrograph through one or more
//! channel reaches to the basin outlet (§4.6).

use log::warn;

/// Routing time step (hours) — matches the Clark hydrograph step.
const DT_HOURS: f64 = 0.25;

/// Route `inflow` through a single Muskingum reach with travel time `k`
/// (hours) and weighting factor `x`. Returns `None` and logs a warning when
/// the reach is numerically unstable for this time step (`D <= 0`), per the
/// guard required by §4.6 — the caller should skip the reach and pass the
/// inflow straight through.
fn route_reach(inflow: &[f64], k: f64, x: f64, reach_label: &str) -> Option<Vec<f64>> {
    let d = k - k * x + 0.5 * DT_HOURS;
    if d <= 0.0 {
        warn!(
            "reach {reach_label}: Muskingum denominator D={d} <= 0 (k={k}, x={x}, dt={DT_HOURS}); skipping reach"
        );
        return None;
    }

    let c0 = (-k * x + 0.5 * DT_HOURS) / d;
    let c1 = (k * x + 0.5 * DT_HOURS) / d;
    let c2 = (k - k * x - 0.5 * DT_HOURS) / d;

    let mut outflow = Vec::with_capacity(inflow.len());
    let mut prev_inflow = inflow.first().copied().unwrap_or(0.0);
    let mut prev_outflow = prev_inflow;
    for &i in inflow {
        let o = c0 * i + c1 * prev_inflow + c2 * prev_outflow;
        outflow.push(o.max(0.0));
        prev_inflow = i;
        prev_outflow = o.max(0.0);
    }
    Some(outflow)
}

/// Route `inflow` through `reaches` identical Muskingum reaches in series
/// (§3). A reach that fails its stability guard is skipped — its inflow
/// passes through unchanged — rather than aborting the whole basin.
pub fn route_reaches(inflow: &[f64], k: f64, x: f64, reaches: u32, basin_id: &str) -> Vec<f64> {
    let mut current = inflow.to_vec();
    for n in 0..reaches.max(1) {
        let label = format!("{basin_id}#{n}");
        if let Some(routed) = route_reach(&current, k, x, &label) {
            current = routed;
        }
    }
    current
}
