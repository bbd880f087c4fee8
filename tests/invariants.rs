//! Integration tests for the quantified invariants in the pipeline's
//! testable-properties section.

use chrono::{TimeZone, Utc};
use crecida::alert::{classify, Level};
use crecida::basin::{Basin, BasinCatalogue, RoutingParams, Subcatchment, Thresholds};
use crecida::clark::direct_runoff_hydrograph;
use crecida::geodesy::Bounds;
use crecida::idw::{interpolate, WeightedSample};
use crecida::loss::effective_rainfall_mm;
use crecida::pipeline::run_cycle;
use crecida::radar::{dbz_to_rain_rate, rain_rate_to_dbz, RadarKind};
use crecida::routing::route_reaches;
use crecida::station::{Station, StationMap};

fn ts() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 28, 12, 0, 0).unwrap()
}

fn bounds() -> Bounds {
    Bounds { north: 1.0, south: -1.0, east: 1.0, west: -1.0 }
}

#[test]
fn effective_rainfall_is_bounded_between_zero_and_gross() {
    for cn in [30, 45, 60, 75, 90, 100] {
        for p in [0, 5, 20, 50, 100, 300] {
            let pe = effective_rainfall_mm(p as f64, cn as f64);
            assert!(pe >= 0.0, "cn={cn} p={p} pe={pe}");
            assert!(pe <= p as f64 + 1e-9, "cn={cn} p={p} pe={pe}");
        }
    }
}

#[test]
fn effective_rainfall_is_exactly_zero_at_and_below_initial_abstraction() {
    let cn = 72.0;
    let s = 25400.0 / cn - 254.0;
    let ia = 0.2 * s;
    assert_eq!(effective_rainfall_mm(ia, cn), 0.0);
    assert_eq!(effective_rainfall_mm(ia - 1.0, cn), 0.0);
}

#[test]
fn clark_hydrograph_never_goes_negative() {
    let h = direct_runoff_hydrograph(50.0, 40.0, 3.0, None);
    assert!(h.ordinates.iter().all(|&q| q >= 0.0));
}

#[test]
fn clark_mass_conservation_within_one_percent() {
    let area = 50.0;
    let pe = 25.0;
    let tc = 2.5;
    let h = direct_runoff_hydrograph(area, pe, tc, None);
    let routed_volume_m3: f64 = h.ordinates.iter().sum::<f64>() * 0.25 * 3600.0;
    let expected_volume_m3 = pe / 1000.0 * area * 1_000_000.0;
    let ratio = routed_volume_m3 / expected_volume_m3;
    assert!((ratio - 1.0).abs() < 0.01, "ratio={ratio}");
}

#[test]
fn idw_returns_exact_value_for_a_colocated_sample() {
    let samples = vec![WeightedSample::new(10.0, 10.0, 17.5), WeightedSample::new(10.2, 10.2, 99.0)];
    let v = interpolate(10.0, 10.0, &samples);
    assert_eq!(v, 17.5);
}

#[test]
fn muskingum_with_x_zero_attenuates_peak() {
    let mut inflow = vec![0.0; 20];
    inflow[0] = 50.0;
    inflow[1] = 30.0;
    let routed = route_reaches(&inflow, 2.0, 0.0, 1, "x-zero");
    let inflow_peak = inflow.iter().cloned().fold(0.0_f64, f64::max);
    let routed_peak = routed.iter().cloned().fold(0.0_f64, f64::max);
    assert!(routed_peak < inflow_peak);
}

#[test]
fn alert_level_is_monotone_in_each_input() {
    let t = Thresholds { yellow: 50.0, orange: 150.0, red: 300.0 };
    let base = classify(10.0, 10.0, 5.0, &t);
    assert!(classify(400.0, 10.0, 5.0, &t) >= base);
    assert!(classify(10.0, 200.0, 5.0, &t) >= base);
    assert!(classify(10.0, 10.0, 90.0, &t) >= base);
}

#[test]
fn marshall_palmer_round_trip_preserves_dbz() {
    for dbz in [5.0, 20.0, 35.0, 50.0, 65.0] {
        let r = dbz_to_rain_rate(dbz, RadarKind::MarshallPalmer);
        let back = rain_rate_to_dbz(r, RadarKind::MarshallPalmer);
        assert!((back - dbz).abs() < 1e-9, "dbz={dbz} back={back}");
    }
}

#[test]
fn routed_subcatchment_peak_never_exceeds_raw_clark_peak() {
    let raw = direct_runoff_hydrograph(30.0, 35.0, 2.0, None);
    let routed = route_reaches(&raw.ordinates, 1.5, 0.2, 2, "attenuation-check");
    let routed_peak = routed.iter().cloned().fold(0.0_f64, f64::max);
    assert!(routed_peak <= raw.peak_cms + 1e-6, "routed={routed_peak} raw={}", raw.peak_cms);
}

#[test]
fn pipeline_routed_subcatchment_peak_never_exceeds_its_own_raw_clark_peak() {
    let basin = Basin {
        id: "routed-check".into(),
        name: "Routed Check".into(),
        basin_type: "river".into(),
        area: 40.0,
        bounds: bounds(),
        outlet_lat: 0.0,
        outlet_lon: 0.0,
        thresholds: Thresholds { yellow: 1.0, orange: 5.0, red: 10.0 },
        subcatchments: vec![Subcatchment {
            id: "routed-check-sc1".into(),
            area: 40.0,
            cn: 85.0,
            slope: 4.0,
            length_km: None,
            tc_hours: Some(2.0),
            storage_coefficient: None,
            bounds: bounds(),
            routing: Some(RoutingParams { k: 1.2, x: 0.1, reaches: 2 }),
        }],
    };
    let mut stations = StationMap::new();
    stations.insert(Station::new("g1".into(), 0.5, 0.5, None, 70.0, 25.0, true, ts()));
    let catalogue = BasinCatalogue { basins: vec![basin] };
    let mut history = crecida::alert::History::new();
    let snapshot = run_cycle(&catalogue, &stations, None, &mut history, ts());

    let sc = &snapshot.basin_results[0].subcatchments[0];
    assert!(sc.raw_peak_cms > 0.0);
    assert!(sc.peak_cms <= sc.raw_peak_cms + 1e-6, "routed={} raw={}", sc.peak_cms, sc.raw_peak_cms);
}

#[test]
fn running_the_same_cycle_twice_is_deterministic() {
    let basin = Basin {
        id: "det".into(),
        name: "Deterministic".into(),
        basin_type: "river".into(),
        area: 40.0,
        bounds: bounds(),
        outlet_lat: 0.0,
        outlet_lon: 0.0,
        thresholds: Thresholds { yellow: 5.0, orange: 15.0, red: 40.0 },
        subcatchments: vec![Subcatchment {
            id: "det-sc1".into(),
            area: 40.0,
            cn: 82.0,
            slope: 4.0,
            length_km: None,
            tc_hours: Some(1.8),
            storage_coefficient: None,
            bounds: bounds(),
            routing: Some(RoutingParams { k: 0.8, x: 0.15, reaches: 2 }),
        }],
    };
    let mut stations = StationMap::new();
    stations.insert(Station::new("g1".into(), 0.2, 0.2, None, 45.0, 20.0, true, ts()));
    let catalogue = BasinCatalogue { basins: vec![basin] };

    let mut history_a = crecida::alert::History::new();
    let snapshot_a = run_cycle(&catalogue, &stations, None, &mut history_a, ts());
    let mut history_b = crecida::alert::History::new();
    let snapshot_b = run_cycle(&catalogue, &stations, None, &mut history_b, ts());

    assert_eq!(snapshot_a.basin_results, snapshot_b.basin_results);
}

#[test]
fn composite_peak_is_positive_when_any_subcatchment_has_rain() {
    let basin = Basin {
        id: "wet".into(),
        name: "Wet Basin".into(),
        basin_type: "river".into(),
        area: 60.0,
        bounds: bounds(),
        outlet_lat: 0.0,
        outlet_lon: 0.0,
        thresholds: Thresholds { yellow: 1.0, orange: 5.0, red: 10.0 },
        subcatchments: vec![
            Subcatchment {
                id: "wet-sc1".into(),
                area: 30.0,
                cn: 85.0,
                slope: 5.0,
                length_km: None,
                tc_hours: Some(1.0),
                storage_coefficient: None,
                bounds: bounds(),
                routing: None,
            },
            Subcatchment {
                id: "wet-sc2".into(),
                area: 30.0,
                cn: 30.0,
                slope: 5.0,
                length_km: None,
                tc_hours: Some(1.0),
                storage_coefficient: None,
                bounds: Bounds { north: 50.0, south: 49.0, east: 50.0, west: 49.0 },
                routing: None,
            },
        ],
    };
    let mut stations = StationMap::new();
    stations.insert(Station::new("g1".into(), 0.0, 0.0, None, 60.0, 30.0, true, ts()));
    let catalogue = BasinCatalogue { basins: vec![basin] };
    let mut history = crecida::alert::History::new();
    let snapshot = run_cycle(&catalogue, &stations, None, &mut history, ts());
    assert!(snapshot.basin_results[0].peak_cms > 0.0);
}
