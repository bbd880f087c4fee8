//! Alert classification and rolling history
//!
//! Classifies a basin's modeled peak flow against its declared thresholds
//! and maintains a bounded rolling history of raised alerts (§4.10).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::basin::Thresholds;

/// History capacity above which old entries are trimmed.
const HISTORY_CAPACITY: usize = 1000;
/// Size the history is trimmed down to once it hits [`HISTORY_CAPACITY`].
const HISTORY_TRIM_TO: usize = 500;

/// Alert severity, ordered `Green < Yellow < Orange < Red`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Green,
    Yellow,
    Orange,
    Red,
}

/// A single classified alert for one basin at one cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub basin_id: String,
    pub level: Level,
    pub message: String,
    pub peak_cms: f64,
    /// Basin mean precipitation (mm) that drove the classification.
    pub precipitation: f64,
    /// Basin max intensity (mm/h) that drove the classification.
    pub intensity: f64,
    pub timestamp: DateTime<Utc>,
}

/// Fixed intensity/precipitation breakpoints that escalate an alert
/// independently of a basin's own flow thresholds (§4.10).
const RED_INTENSITY_MM_H: f64 = 60.0;
const RED_PRECIP_MM: f64 = 100.0;
const ORANGE_INTENSITY_MM_H: f64 = 30.0;
const ORANGE_PRECIP_MM: f64 = 50.0;
const YELLOW_INTENSITY_MM_H: f64 = 15.0;
const YELLOW_PRECIP_MM: f64 = 20.0;

/// Classify a basin's cycle result: first match wins, top-down, across
/// peak flow, basin max intensity, and basin mean precipitation, each
/// checked independently against its own breakpoint (§4.10).
pub fn classify(peak_cms: f64, mean_precip_mm: f64, max_intensity_mm_h: f64, thresholds: &Thresholds) -> Level {
    if peak_cms >= thresholds.red || max_intensity_mm_h >= RED_INTENSITY_MM_H || mean_precip_mm >= RED_PRECIP_MM {
        Level::Red
    } else if peak_cms >= thresholds.orange
        || max_intensity_mm_h >= ORANGE_INTENSITY_MM_H
        || mean_precip_mm >= ORANGE_PRECIP_MM
    {
        Level::Orange
    } else if peak_cms >= thresholds.yellow
        || max_intensity_mm_h >= YELLOW_INTENSITY_MM_H
        || mean_precip_mm >= YELLOW_PRECIP_MM
    {
        Level::Yellow
    } else {
        Level::Green
    }
}

/// A bounded rolling history of raised alerts, oldest first. Once it
/// reaches [`HISTORY_CAPACITY`] entries it is trimmed back down to the most
/// recent [`HISTORY_TRIM_TO`] rather than growing without bound.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct History {
    entries: Vec<Alert>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, alert: Alert) {
        self.entries.push(alert);
        if self.entries.len() > HISTORY_CAPACITY {
            let drop = self.entries.len() - HISTORY_TRIM_TO;
            self.entries.drain(0..drop);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Alert] {
        &self.entries
    }

    /// The most recent alert for each basin whose current level is above
    /// green, ordered by severity (red, then orange, then yellow) and
    /// stable within a severity by first-seen order (§4.10, §5).
    pub fn active(&self) -> Vec<&Alert> {
        use std::collections::HashMap;
        let mut latest: HashMap<&str, &Alert> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for alert in &self.entries {
            if !latest.contains_key(alert.basin_id.as_str()) {
                order.push(alert.basin_id.as_str());
            }
            latest.insert(alert.basin_id.as_str(), alert);
        }
        let mut active: Vec<&Alert> = order
            .into_iter()
            .map(|id| latest[id])
            .filter(|a| a.level != Level::Green)
            .collect();
        active.sort_by(|a, b| b.level.cmp(&a.level));
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 28, 12, 0, 0).unwrap()
    }

    fn thresholds() -> Thresholds {
        Thresholds { yellow: 50.0, orange: 150.0, red: 300.0 }
    }

    #[test]
    fn classification_respects_flow_boundaries() {
        let t = thresholds();
        assert_eq!(classify(0.0, 0.0, 0.0, &t), Level::Green);
        assert_eq!(classify(50.0, 0.0, 0.0, &t), Level::Yellow);
        assert_eq!(classify(150.0, 0.0, 0.0, &t), Level::Orange);
        assert_eq!(classify(300.0, 0.0, 0.0, &t), Level::Red);
        assert_eq!(classify(1000.0, 0.0, 0.0, &t), Level::Red);
    }

    #[test]
    fn high_intensity_or_precip_escalates_even_with_low_flow() {
        let t = thresholds();
        assert_eq!(classify(0.0, 0.0, 15.0, &t), Level::Yellow);
        assert_eq!(classify(0.0, 0.0, 30.0, &t), Level::Orange);
        assert_eq!(classify(0.0, 0.0, 60.0, &t), Level::Red);
        assert_eq!(classify(0.0, 20.0, 0.0, &t), Level::Yellow);
        assert_eq!(classify(0.0, 50.0, 0.0, &t), Level::Orange);
        assert_eq!(classify(0.0, 100.0, 0.0, &t), Level::Red);
    }

    #[test]
    fn alert_escalation_follows_first_match_wins_across_flow_intensity_and_precip() {
        let t = Thresholds { yellow: 50.0, orange: 150.0, red: 300.0 };
        assert_eq!(classify(40.0, 10.0, 10.0, &t), Level::Green);
        assert_eq!(classify(60.0, 10.0, 10.0, &t), Level::Yellow);
        assert_eq!(classify(60.0, 10.0, 35.0, &t), Level::Orange);
        assert_eq!(classify(60.0, 120.0, 35.0, &t), Level::Red);
    }

    #[test]
    fn severity_ordering_holds() {
        assert!(Level::Green < Level::Yellow);
        assert!(Level::Yellow < Level::Orange);
        assert!(Level::Orange < Level::Red);
    }

    fn alert(basin_id: &str, level: Level, peak_cms: f64) -> Alert {
        Alert {
            basin_id: basin_id.into(),
            level,
            message: format!("{basin_id} at {level:?}"),
            peak_cms,
            precipitation: 0.0,
            intensity: 0.0,
            timestamp: ts(),
        }
    }

    #[test]
    fn history_trims_once_capacity_exceeded() {
        let mut history = History::new();
        for i in 0..1001 {
            history.push(alert(&format!("b{i}"), Level::Green, 0.0));
        }
        assert_eq!(history.len(), HISTORY_TRIM_TO);
    }

    #[test]
    fn active_excludes_green_and_keeps_latest_per_basin() {
        let mut history = History::new();
        history.push(alert("b1", Level::Yellow, 60.0));
        history.push(alert("b1", Level::Green, 10.0));
        history.push(alert("b2", Level::Red, 400.0));
        let active = history.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].basin_id, "b2");
    }

    #[test]
    fn active_orders_by_severity_not_basin_id() {
        let mut history = History::new();
        history.push(alert("a-basin", Level::Yellow, 10.0));
        history.push(alert("z-basin", Level::Red, 400.0));
        history.push(alert("m-basin", Level::Orange, 100.0));
        let active = history.active();
        let levels: Vec<Level> = active.iter().map(|a| a.level).collect();
        assert_eq!(levels, vec![Level::Red, Level::Orange, Level::Yellow]);
    }
}
