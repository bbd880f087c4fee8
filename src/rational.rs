//! Rational-method peak flow cross-check
//!
//! A cheap auxiliary peak-flow estimate used alongside the Clark/Muskingum
//! chain, via `Q = C * I * A / 3.6` (I in mm/h, A in km^2, Q in m^3/s).
//!
//! Two CN-to-runoff-coefficient tables exist upstream in the system this
//! pipeline descends from: a fine-grained table for the per-subcatchment
//! check and a coarser one for the lumped basin-level fallback. That
//! asymmetry is preserved here rather than collapsed to one table (§4.9
//! open question) — the two checks are read by different downstream
//! consumers and were never meant to agree exactly.

/// Unit conversion constant for `Q = C*I*A/K` with I in mm/h, A in km^2.
const RATIONAL_CONSTANT: f64 = 3.6;

/// Fine-grained CN -> C lookup used for the per-subcatchment check (§4.9).
fn runoff_coefficient_fine(cn: f64) -> f64 {
    if cn >= 90.0 {
        0.85
    } else if cn >= 85.0 {
        0.72
    } else if cn >= 80.0 {
        0.60
    } else if cn >= 75.0 {
        0.50
    } else if cn >= 70.0 {
        0.40
    } else if cn >= 65.0 {
        0.30
    } else if cn >= 60.0 {
        0.22
    } else {
        0.15
    }
}

/// Coarser CN -> C lookup used for the lumped basin-level fallback.
fn runoff_coefficient_coarse(cn: f64) -> f64 {
    if cn < 60.0 {
        0.20
    } else if cn < 80.0 {
        0.45
    } else if cn < 90.0 {
        0.65
    } else {
        0.85
    }
}

/// Per-subcatchment rational-method peak flow (m^3/s), using the
/// fine-grained table.
pub fn peak_flow_subcatchment_cms(cn: f64, intensity_mm_h: f64, area_km2: f64) -> f64 {
    runoff_coefficient_fine(cn) * intensity_mm_h * area_km2 / RATIONAL_CONSTANT
}

/// Lumped basin-level rational-method peak flow (m^3/s), using the coarse
/// table — this is the fallback path used when a basin has no
/// subcatchments (§4.9).
pub fn peak_flow_lumped_cms(cn: f64, intensity_mm_h: f64, area_km2: f64) -> f64 {
    runoff_coefficient_coarse(cn) * intensity_mm_h * area_km2 / RATIONAL_CONSTANT
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fine_and_coarse_tables_can_disagree_at_the_same_cn() {
        let fine = runoff_coefficient_fine(72.0);
        let coarse = runoff_coefficient_coarse(72.0);
        assert!((fine - coarse).abs() > 1e-9);
    }

    #[test]
    fn zero_intensity_yields_zero_peak() {
        assert_eq!(peak_flow_subcatchment_cms(80.0, 0.0, 10.0), 0.0);
        assert_eq!(peak_flow_lumped_cms(80.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn peak_scales_linearly_with_area() {
        let small = peak_flow_subcatchment_cms(75.0, 20.0, 10.0);
        let large = peak_flow_subcatchment_cms(75.0, 20.0, 20.0);
        assert_abs_diff_eq!(large, small * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn higher_cn_never_decreases_subcatchment_peak() {
        let low = peak_flow_subcatchment_cms(55.0, 20.0, 10.0);
        let high = peak_flow_subcatchment_cms(95.0, 20.0, 10.0);
        assert!(high >= low);
    }
}
