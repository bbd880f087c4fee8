//! # Crecida — flash-flood early-warning hydrology pipeline
//!
//! A near-real-time pipeline that turns weather-station and radar
//! observations into per-basin flood alerts.
//!
//! ## Overview
//!
//! The library is organized into several modules, roughly in the order
//! data flows through a cycle:
//!
//! - [`geodesy`] - great-circle distance and lat/lon bounding boxes
//! - [`idw`] - inverse-distance-weighted spatial interpolation
//! - [`radar`] - reflectivity grids and the dBZ-to-rain-rate Z-R relation
//! - [`station`] - weather-station observations
//! - [`merge`] - conditional radar-gauge merging
//! - [`basin`] - the basin/subcatchment catalogue
//! - [`estimator`] - per-subcatchment rainfall estimation
//! - [`loss`] - SCS curve-number loss and Témez time of concentration
//! - [`clark`] - Clark unit hydrograph
//! - [`routing`] - Muskingum channel routing
//! - [`rational`] - rational-method peak-flow cross-check
//! - [`hydrology`] - semi-distributed basin model orchestration
//! - [`alert`] - alert classification and rolling history
//! - [`snapshot`] - the atomically-swapped cycle result
//! - [`pipeline`] - the cycle coordinator
//! - [`csv`] - CSV input/output for station feeds and snapshot export
//! - [`error`] - core validation errors
//!
//! ## Example
//!
//! ```no_run
//! use crecida::basin::BasinCatalogue;
//! use crecida::station::StationMap;
//! use crecida::alert::History;
//! use crecida::pipeline::run_cycle;
//! use chrono::Utc;
//! use std::fs;
//!
//! let json = fs::read_to_string("basins.json").unwrap();
//! let catalogue = BasinCatalogue::from_json(&json).unwrap();
//! let stations = StationMap::new();
//! let mut history = History::new();
//! let snapshot = run_cycle(&catalogue, &stations, None, &mut history, Utc::now());
//! println!("{} basins modeled", snapshot.basin_results.len());
//! ```

pub mod alert;
pub mod basin;
pub mod clark;
pub mod csv;
pub mod error;
pub mod estimator;
pub mod geodesy;
pub mod hydrology;
pub mod idw;
pub mod loss;
pub mod merge;
pub mod pipeline;
pub mod radar;
pub mod rational;
pub mod routing;
pub mod snapshot;
pub mod station;
