//! Hourly snow depth to per-day maximum reduction

use crate::models::HourlySeries;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::debug;

/// Meters to centimeters
const CM_PER_M: f64 = 100.0;

/// Length of the "YYYY-MM-DD" prefix of a timestamp
const DAY_KEY_LEN: usize = 10;

/// Deepest snow cover per calendar day, in centimeters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySnowDepthMax(BTreeMap<String, f64>);

impl DailySnowDepthMax {
    /// Maximum for `day` ("YYYY-MM-DD"), if any valid sample fell on it
    #[must_use]
    pub fn get(&self, day: &str) -> Option<f64> {
        self.0.get(day).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(day, cm)| (day.as_str(), *cm))
    }

    /// Fold one sample into the running maximum for its day
    fn observe(&mut self, day: &str, depth_cm: f64) {
        match self.0.entry(day.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(depth_cm);
            }
            Entry::Occupied(mut slot) => {
                if depth_cm > *slot.get() {
                    slot.insert(depth_cm);
                }
            }
        }
    }
}

/// Reduces hourly snow depth samples to a daily maximum
pub struct SnowDepthReducer;

impl SnowDepthReducer {
    /// Build the per-day maximum snow depth in centimeters
    ///
    /// Samples without a timestamp or a finite depth are skipped. An absent
    /// series, or one missing either column, yields an empty map.
    #[must_use]
    pub fn reduce_to_daily(hourly: Option<&HourlySeries>) -> DailySnowDepthMax {
        let mut by_day = DailySnowDepthMax::default();

        let Some(HourlySeries {
            time: Some(time),
            snow_depth: Some(snow_depth),
        }) = hourly
        else {
            debug!("No hourly snow depth to reduce");
            return by_day;
        };

        let mut skipped = 0usize;
        for (timestamp, depth_m) in time.iter().zip(snow_depth) {
            match (timestamp, depth_m.filter(|m| m.is_finite())) {
                (Some(timestamp), Some(depth_m)) => {
                    by_day.observe(day_key(timestamp), depth_m * CM_PER_M);
                }
                _ => skipped += 1,
            }
        }

        debug!(
            "Reduced {} hourly samples to {} days ({} skipped)",
            time.len().min(snow_depth.len()),
            by_day.len(),
            skipped
        );
        by_day
    }
}

/// Calendar day of an ISO-8601-like timestamp
fn day_key(timestamp: &str) -> &str {
    match timestamp.char_indices().nth(DAY_KEY_LEN) {
        Some((end, _)) => &timestamp[..end],
        None => timestamp,
    }
}
