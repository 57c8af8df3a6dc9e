//! Combined output of the attendance model ensemble.

use serde::{Deserialize, Serialize};

use super::streak::StreakForecast;

/// Tomorrow's presence probability as produced by one model slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    pub model: String,
    /// Probability in [0, 1].
    pub probability: f64,
}

/// Ensemble attendance report for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleReport {
    /// One tomorrow-probability per model, in slot order.
    pub per_model: Vec<ModelPrediction>,
    /// Multi-day probability forecast from the seasonal slot.
    pub next_week_forecast: Vec<f64>,
    pub streak_prediction: StreakForecast,
    /// `1 - average_prediction`.
    pub absence_likelihood: f64,
    /// Arithmetic mean of the per-model probabilities.
    pub average_prediction: f64,
}
