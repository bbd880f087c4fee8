//! Radar reflectivity and the Z-R relation
//!
//! Decoded reflectivity grids and the empirical power-law conversion from
//! dBZ to rain rate (§6). Merging (`merge.rs`) always uses Marshall-Palmer;
//! `RadarKind::Convective` is exposed for external collaborators that want
//! a steeper Z-R curve but is not selected anywhere in the core pipeline.

use serde::{Deserialize, Serialize};

/// A single decoded radar pixel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RadarPixel {
    pub lat: f64,
    pub lon: f64,
    /// Reflectivity in dBZ. May be any real value; pixels with no return
    /// are simply absent from the grid rather than represented here.
    pub dbz: f64,
}

/// A decoded reflectivity grid: an unordered list of pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RadarGrid {
    pub pixels: Vec<RadarPixel>,
}

impl RadarGrid {
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixels whose coordinates fall within `bounds` (no margin, per §4.8).
    pub fn filtered(&self, bounds: &crate::geodesy::Bounds) -> Vec<RadarPixel> {
        self.pixels
            .iter()
            .copied()
            .filter(|p| bounds.contains(p.lat, p.lon))
            .collect()
    }
}

/// Z-R relation family.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RadarKind {
    /// a = 200, b = 1.6. Always used by conditional merging (§4.7).
    MarshallPalmer,
    /// a = 300, b = 1.4.
    Convective,
}

impl RadarKind {
    fn coefficients(self) -> (f64, f64) {
        match self {
            RadarKind::MarshallPalmer => (200.0, 1.6),
            RadarKind::Convective => (300.0, 1.4),
        }
    }
}

/// Convert reflectivity (dBZ) to rain rate (mm/h) via `Z = 10^(dBZ/10)`,
/// `R = (Z/a)^(1/b)`.
pub fn dbz_to_rain_rate(dbz: f64, kind: RadarKind) -> f64 {
    let (a, b) = kind.coefficients();
    let z = 10f64.powf(dbz / 10.0);
    (z / a).powf(1.0 / b)
}

/// Inverse of [`dbz_to_rain_rate`]: recover dBZ from a rain rate, used only
/// to check the round-trip property in tests.
pub fn rain_rate_to_dbz(rate_mm_h: f64, kind: RadarKind) -> f64 {
    let (a, b) = kind.coefficients();
    let z = a * rate_mm_h.powf(b);
    10.0 * z.log10()
}

/// Rainfall intensity classification band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IntensityBand {
    None,
    Light,
    Moderate,
    Heavy,
    VeryHeavy,
    Torrential,
}

/// Classify an intensity (mm/h) into its band (§6).
pub fn classify_intensity(mm_per_h: f64) -> IntensityBand {
    if mm_per_h <= 1.0 {
        IntensityBand::None
    } else if mm_per_h <= 5.0 {
        IntensityBand::Light
    } else if mm_per_h <= 15.0 {
        IntensityBand::Moderate
    } else if mm_per_h <= 30.0 {
        IntensityBand::Heavy
    } else if mm_per_h <= 60.0 {
        IntensityBand::VeryHeavy
    } else {
        IntensityBand::Torrential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshall_palmer_spot_check() {
        // dBZ = 35: Z = 10^3.5 ≈ 3162.28; R ≈ 5.57 mm/h (§8 scenario 4).
        let r = dbz_to_rain_rate(35.0, RadarKind::MarshallPalmer);
        assert!((r - 5.57).abs() < 0.02, "got {r}");
    }

    #[test]
    fn round_trip_preserves_dbz() {
        for dbz in [10.0, 25.0, 35.0, 50.0] {
            let r = dbz_to_rain_rate(dbz, RadarKind::MarshallPalmer);
            let back = rain_rate_to_dbz(r, RadarKind::MarshallPalmer);
            assert!((back - dbz).abs() < 1e-9, "dbz={dbz} back={back}");
        }
    }

    #[test]
    fn intensity_bands() {
        assert_eq!(classify_intensity(0.5), IntensityBand::None);
        assert_eq!(classify_intensity(3.0), IntensityBand::Light);
        assert_eq!(classify_intensity(10.0), IntensityBand::Moderate);
        assert_eq!(classify_intensity(25.0), IntensityBand::Heavy);
        assert_eq!(classify_intensity(45.0), IntensityBand::VeryHeavy);
        assert_eq!(classify_intensity(100.0), IntensityBand::Torrential);
    }

    #[test]
    fn grid_filter_respects_bounds() {
        let grid = RadarGrid {
            pixels: vec![
                RadarPixel { lat: 5.0, lon: 5.0, dbz: 30.0 },
                RadarPixel { lat: 50.0, lon: 50.0, dbz: 30.0 },
            ],
        };
        let bounds = crate::geodesy::Bounds { north: 10.0, south: 0.0, east: 10.0, west: 0.0 };
        let filtered = grid.filtered(&bounds);
        assert_eq!(filtered.len(), 1);
    }
}
