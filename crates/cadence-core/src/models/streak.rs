//! Derived streak statistics. Computed on demand, never stored.

use serde::{Deserialize, Serialize};

/// Attendance streak statistics derived from the ensemble probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakForecast {
    /// Consecutive fully-present days, newest backward.
    pub current_streak: u32,
    /// Probability the streak continues tomorrow, 0–100 (one decimal).
    pub probability_continue: f64,
    /// Geometric expectation of additional streak days, clamped near p = 1.
    pub expected_more_days: f64,
}

/// Productivity streak block of a prediction summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakPrediction {
    /// Consecutive days with a positive score, newest backward.
    pub current: u32,
    /// Probability the streak continues tomorrow, 0–100.
    pub continue_probability: u32,
    /// Forecast days at or above the productive threshold.
    pub expected_duration: u32,
    /// Normalized historical average, 0–100.
    pub health: u32,
    pub message: String,
}

impl StreakPrediction {
    /// Neutral block returned when there is not enough history.
    pub fn insufficient_data() -> Self {
        Self {
            current: 0,
            continue_probability: 0,
            expected_duration: 0,
            health: 0,
            message: "Not enough data yet.".to_string(),
        }
    }
}
