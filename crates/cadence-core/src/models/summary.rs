//! The assembled prediction summary handed back to callers.

use serde::{Deserialize, Serialize};

use super::forecast::ForecastResult;
use super::streak::StreakPrediction;

/// Workload classification over the trailing history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadLabel {
    Overwork,
    Underwork,
    Balanced,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadRisk {
    pub label: WorkloadLabel,
    pub description: String,
}

impl WorkloadRisk {
    pub fn unknown() -> Self {
        Self {
            label: WorkloadLabel::Unknown,
            description: "Start logging tasks to get predictions".to_string(),
        }
    }
}

/// Suggested focus area derived from workload and streak outlook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusArea {
    Consistency,
    Recovery,
    Execution,
    StretchGoals,
}

/// Structured forecast summary for one user.
///
/// Total under normal operation: data-availability problems produce the
/// documented neutral values instead of errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    /// Forecast score for tomorrow; `None` when history is insufficient.
    pub tomorrow_score: Option<i32>,
    /// Forecast scores for the next horizon days.
    pub next_7_days: Vec<i32>,
    pub streak_prediction: StreakPrediction,
    pub workload_risk: WorkloadRisk,
    pub recommendation: String,
    pub focus_area: FocusArea,
    /// Forecast confidence in [0, 1].
    pub confidence: f64,
    pub trend: ForecastResult,
}
