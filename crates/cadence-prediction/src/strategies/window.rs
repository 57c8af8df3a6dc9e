//! Sequence-window attendance model.

use cadence_core::constants::FALLBACK_ATTENDANCE_PROBABILITY;
use cadence_core::models::AttendanceRecord;
use cadence_core::traits::AttendanceModel;

/// Trailing weights considered by the window.
const WINDOW: usize = 30;

/// Per-step weight decay, newest first.
const DECAY: f64 = 0.9;

/// Minimum rows before the window is considered representative.
const MIN_ROWS: usize = 40;

/// Exponentially weighted mean over the trailing presence window. The
/// hungriest slot: it refuses to speak until the series is long enough
/// that the window reflects a settled routine, and pads a short window
/// with the series mean.
pub struct WindowModel {
    trained: bool,
}

impl WindowModel {
    pub fn new() -> Self {
        Self { trained: false }
    }
}

impl Default for WindowModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceModel for WindowModel {
    fn name(&self) -> &'static str {
        "window"
    }

    fn train(&mut self, series: &[AttendanceRecord]) -> bool {
        self.trained = series.len() >= MIN_ROWS;
        self.trained
    }

    fn predict(&self, series: &[AttendanceRecord]) -> f64 {
        if !self.trained || series.is_empty() {
            return FALLBACK_ATTENDANCE_PROBABILITY;
        }

        let weights: Vec<f64> = series.iter().map(|r| r.attendance).collect();
        let mean = weights.iter().sum::<f64>() / weights.len() as f64;
        let mut window: Vec<f64> = if weights.len() >= WINDOW {
            weights[weights.len() - WINDOW..].to_vec()
        } else {
            let mut padded = vec![mean; WINDOW - weights.len()];
            padded.extend_from_slice(&weights);
            padded
        };
        window.reverse(); // newest first

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut weight = 1.0;
        for value in &window {
            weighted_sum += weight * value;
            weight_total += weight;
            weight *= DECAY;
        }

        (weighted_sum / weight_total).clamp(0.0, 1.0)
    }

    fn is_trained(&self) -> bool {
        self.trained
    }
}
