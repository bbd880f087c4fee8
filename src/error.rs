//! Core error types
//!
//! Degraded inputs (missing radar, missing gauges, a subcatchment with no
//! data) are never represented as errors — each has a defined fallback
//! producing zeros (see `estimator` and `merge`). Only unphysical basin
//! parameters fail, and the failure is scoped to that single basin so a
//! cycle can continue processing the rest of the catalogue.

use thiserror::Error;

/// A validation failure for a single basin or subcatchment.
///
/// These are the only errors the core raises; everything else degrades to
/// a documented fallback (`Method::NoData`, zeroed hydrographs, etc.).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("subcatchment {0}: curve number {1} outside [30, 100]")]
    CurveNumberOutOfRange(String, f64),

    #[error("subcatchment {0}: area {1} must be positive")]
    NonPositiveArea(String, f64),

    #[error("subcatchment {0}: routing parameter X {1} outside [0, 0.5]")]
    MuskingumXOutOfRange(String, f64),

    #[error("subcatchment {0}: routing parameter K {1} must be positive")]
    NonPositiveMuskingumK(String, f64),

    #[error("subcatchment {0}: routing reaches {1} must be >= 1")]
    ReachesLessThanOne(String, u32),

    #[error("basin {0}: thresholds must be strictly increasing (yellow={1}, orange={2}, red={3})")]
    ThresholdsNotIncreasing(String, f64, f64, f64),
}

/// Result alias used throughout the validation/basin-processing paths.
pub type CoreResult<T> = Result<T, CoreError>;
