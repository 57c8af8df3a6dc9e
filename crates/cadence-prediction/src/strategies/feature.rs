//! Lag-feature attendance model.

use chrono::{Datelike, Duration, NaiveDate};

use cadence_core::constants::FALLBACK_ATTENDANCE_PROBABILITY;
use cadence_core::models::AttendanceRecord;
use cadence_core::traits::AttendanceModel;
use cadence_forecast::LinearModel;

/// Longest lag in the feature set; earlier rows cannot be training rows.
const MAX_LAG: usize = 7;

/// Minimum rows carrying a full feature set before a fit is attempted.
const MIN_USABLE_ROWS: usize = 10;

/// Least-squares fit over lagged presence features: yesterday's weight,
/// the same weekday last week, a 7-day rolling mean, the weekday index,
/// a weekend flag, and the series index.
pub struct FeatureModel {
    model: Option<LinearModel>,
}

impl FeatureModel {
    pub fn new() -> Self {
        Self { model: None }
    }
}

impl Default for FeatureModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Feature row for position `index`; `date` is the day being predicted
/// (for training that is the row's own date, for inference tomorrow).
fn features_at(series: &[AttendanceRecord], index: usize, date: NaiveDate) -> Vec<f64> {
    let lag_1 = series[index - 1].attendance;
    let lag_7 = series[index - MAX_LAG].attendance;
    let window = &series[index - MAX_LAG..index];
    let rolling_mean =
        window.iter().map(|r| r.attendance).sum::<f64>() / window.len() as f64;
    let weekday = f64::from(date.weekday().num_days_from_monday());
    let is_weekend = if weekday >= 5.0 { 1.0 } else { 0.0 };
    vec![lag_1, lag_7, rolling_mean, weekday, is_weekend, index as f64]
}

impl AttendanceModel for FeatureModel {
    fn name(&self) -> &'static str {
        "feature"
    }

    fn train(&mut self, series: &[AttendanceRecord]) -> bool {
        if series.len() < MAX_LAG + MIN_USABLE_ROWS {
            self.model = None;
            return false;
        }

        let features: Vec<Vec<f64>> = (MAX_LAG..series.len())
            .map(|i| features_at(series, i, series[i].date))
            .collect();
        let targets: Vec<f64> = series[MAX_LAG..].iter().map(|r| r.attendance).collect();

        self.model = LinearModel::fit(&features, &targets);
        self.model.is_some()
    }

    fn predict(&self, series: &[AttendanceRecord]) -> f64 {
        let Some(model) = &self.model else {
            return FALLBACK_ATTENDANCE_PROBABILITY;
        };
        if series.len() < MAX_LAG {
            return FALLBACK_ATTENDANCE_PROBABILITY;
        }

        let tomorrow = series[series.len() - 1].date + Duration::days(1);
        model
            .predict(&features_at(series, series.len(), tomorrow))
            .clamp(0.0, 1.0)
    }

    fn is_trained(&self) -> bool {
        self.model.is_some()
    }
}
