//! Snapshot and atomic swap
//!
//! The result of one full pipeline cycle — every basin's modeled response,
//! the active alert set, and the inputs that produced them — held behind a
//! single atomically-swapped pointer so readers never observe a
//! partially-updated cycle (§5).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::alert::Alert;
use crate::hydrology::BasinResult;
use crate::radar::RadarGrid;
use crate::station::StationMap;

/// A basin that failed validation or modeling during a cycle, and why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BasinFailure {
    pub basin_id: String,
    pub message: String,
}

/// The complete output of one pipeline cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub stations: StationMap,
    pub radar: Option<RadarGrid>,
    pub basin_results: Vec<BasinResult>,
    pub active_alerts: Vec<Alert>,
    pub failures: Vec<BasinFailure>,
}

impl Snapshot {
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            stations: StationMap::new(),
            radar: None,
            basin_results: Vec::new(),
            active_alerts: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Holds the current snapshot behind a `RwLock<Arc<_>>` so a new cycle's
/// result replaces the old one in one atomic pointer swap — readers always
/// see either the whole previous cycle or the whole new one, never a mix
/// (§5). On a failed cycle the previous snapshot is retained wholesale; the
/// coordinator simply does not call `swap`.
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    pub fn new(initial: Snapshot) -> Self {
        Self { current: RwLock::new(Arc::new(initial)) }
    }

    pub fn load(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    pub fn swap(&self, new_snapshot: Snapshot) {
        *self.current.write() = Arc::new(new_snapshot);
    }
}
