//! Transient forecast values returned to callers. Never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One (date, score) point on a trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub score: i32,
}

/// Echoed history plus a bounded-horizon forecast, both chronological.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub history: Vec<ForecastPoint>,
    pub forecast: Vec<ForecastPoint>,
}

impl ForecastResult {
    /// An empty series produces an empty result; callers must handle
    /// this explicitly rather than expecting an error.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty() || self.forecast.is_empty()
    }
}

/// Direction of change between two consecutive scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// Change between the two most recent scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendDelta {
    pub direction: TrendDirection,
    /// Absolute change relative to the previous score, in percent.
    pub percentage: f64,
    pub value: f64,
}

impl TrendDelta {
    pub fn stable() -> Self {
        Self {
            direction: TrendDirection::Stable,
            percentage: 0.0,
            value: 0.0,
        }
    }
}
