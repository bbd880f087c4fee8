//! Minimal end-to-end example: build a one-basin catalogue in memory, feed
//! it two station observations, and run a single cycle.

use chrono::Utc;
use crecida::alert::History;
use crecida::basin::{Basin, BasinCatalogue, Subcatchment, Thresholds};
use crecida::geodesy::Bounds;
use crecida::pipeline::run_cycle;
use crecida::station::{Station, StationMap};

fn main() {
    let bounds = Bounds { north: 40.6, south: 40.2, east: -3.4, west: -3.9 };

    let catalogue = BasinCatalogue {
        basins: vec![Basin {
            id: "manzanares-upper".into(),
            name: "Manzanares (upper reach)".into(),
            basin_type: "river".into(),
            area: 45.0,
            bounds,
            outlet_lat: 40.35,
            outlet_lon: -3.75,
            thresholds: Thresholds { yellow: 20.0, orange: 60.0, red: 150.0 },
            subcatchments: vec![Subcatchment {
                id: "manzanares-upper-sc1".into(),
                area: 45.0,
                cn: 78.0,
                slope: 6.0,
                length_km: None,
                tc_hours: None,
                storage_coefficient: None,
                bounds,
                routing: None,
            }],
        }],
    };

    let mut stations = StationMap::new();
    stations.insert(Station::new("E-001".into(), 40.45, -3.7, Some(650.0), 35.0, 18.0, true, Utc::now()));
    stations.insert(Station::new("E-002".into(), 40.30, -3.65, Some(610.0), 42.0, 22.0, true, Utc::now()));

    let mut history = History::new();
    let snapshot = run_cycle(&catalogue, &stations, None, &mut history, Utc::now());

    for result in &snapshot.basin_results {
        println!(
            "basin {}: peak={:.1} m^3/s at t+{:.2}h",
            result.basin_id, result.peak_cms, result.time_to_peak_hours
        );
    }
    for alert in &snapshot.active_alerts {
        println!("ALERT [{:?}] basin {}: {:.1} m^3/s", alert.level, alert.basin_id, alert.peak_cms);
    }
}
