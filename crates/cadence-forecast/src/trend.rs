//! Bounded-horizon trend forecasting over a user's trailing history.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use cadence_core::constants::MIN_FIT_POINTS;
use cadence_core::errors::{CadenceError, CadenceResult};
use cadence_core::models::{DailyRecord, ForecastPoint, ForecastResult};

use crate::regression::LinearModel;

/// Per-call trend forecaster.
///
/// The regression is fitted on every call rather than persisted; callers
/// must gate calls behind the prediction cache so a fit only happens on
/// a cache miss.
pub struct TrendForecaster {
    min_fit_points: usize,
}

impl TrendForecaster {
    pub fn new() -> Self {
        Self {
            min_fit_points: MIN_FIT_POINTS,
        }
    }

    pub fn with_min_fit_points(min_fit_points: usize) -> Self {
        Self { min_fit_points }
    }

    /// Forecast `horizon` days from the user's trailing `history_days`
    /// records within `rows`.
    ///
    /// Fewer than `min_fit_points` history points skip the model fit and
    /// flat-line at the rounded history mean. An empty series yields an
    /// empty result, not an error. Zero horizon or window is the one
    /// caller-visible error.
    pub fn get_trend(
        &self,
        rows: &[DailyRecord],
        user_id: i64,
        history_days: usize,
        horizon: usize,
    ) -> CadenceResult<ForecastResult> {
        if horizon == 0 {
            return Err(CadenceError::InvalidHorizon { value: horizon });
        }
        if history_days == 0 {
            return Err(CadenceError::InvalidWindow {
                value: history_days,
            });
        }

        let mut series: Vec<&DailyRecord> =
            rows.iter().filter(|r| r.user_id == user_id).collect();
        series.sort_by_key(|r| r.date);
        if series.is_empty() {
            return Ok(ForecastResult::default());
        }

        let window = &series[series.len().saturating_sub(history_days)..];
        let last_date = window[window.len() - 1].date;
        let history: Vec<ForecastPoint> = window
            .iter()
            .map(|r| ForecastPoint {
                date: r.date,
                score: r.score.round() as i32,
            })
            .collect();

        if window.len() < self.min_fit_points {
            return Ok(ForecastResult {
                forecast: flat_forecast(window, last_date, horizon),
                history,
            });
        }

        let features: Vec<Vec<f64>> = window
            .iter()
            .enumerate()
            .map(|(i, r)| vec![i as f64, weekday_index(r.date)])
            .collect();
        let targets: Vec<f64> = window.iter().map(|r| r.score).collect();

        let Some(model) = LinearModel::fit(&features, &targets) else {
            // Degenerate fit: fall back the same way sparse data does.
            return Ok(ForecastResult {
                forecast: flat_forecast(window, last_date, horizon),
                history,
            });
        };
        debug!(user_id, points = window.len(), "fitted trend model");

        let last_index = window.len() - 1;
        let forecast = (1..=horizon)
            .map(|offset| {
                let date = last_date + Duration::days(offset as i64);
                let predicted = model
                    .predict(&[(last_index + offset) as f64, weekday_index(date)]);
                ForecastPoint {
                    date,
                    score: predicted.clamp(0.0, 100.0).round() as i32,
                }
            })
            .collect();

        Ok(ForecastResult { history, forecast })
    }
}

impl Default for TrendForecaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Flat-line forecast at the rounded history mean.
fn flat_forecast(
    window: &[&DailyRecord],
    last_date: NaiveDate,
    horizon: usize,
) -> Vec<ForecastPoint> {
    let mean = window.iter().map(|r| r.score).sum::<f64>() / window.len() as f64;
    let score = mean.round() as i32;
    (1..=horizon)
        .map(|offset| ForecastPoint {
            date: last_date + Duration::days(offset as i64),
            score,
        })
        .collect()
}

/// ISO day-of-week as 0–6, Monday first.
fn weekday_index(date: NaiveDate) -> f64 {
    f64::from(date.weekday().num_days_from_monday())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(user_id: i64, start: NaiveDate, scores: &[f64]) -> Vec<DailyRecord> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| DailyRecord {
                user_id,
                date: start + Duration::days(i as i64),
                score,
                completed: 0,
                total: 0,
            })
            .collect()
    }

    fn monday() -> NaiveDate {
        // 2025-06-02 is a Monday.
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn empty_series_yields_empty_result() {
        let forecaster = TrendForecaster::new();
        let result = forecaster.get_trend(&[], 1, 30, 7).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn zero_horizon_is_an_error() {
        let forecaster = TrendForecaster::new();
        assert!(forecaster.get_trend(&[], 1, 30, 0).is_err());
        assert!(forecaster.get_trend(&[], 1, 0, 7).is_err());
    }

    #[test]
    fn sparse_history_flat_lines_at_rounded_mean() {
        let forecaster = TrendForecaster::new();
        let data = rows(1, monday(), &[50.0, 60.0, 71.0]);

        let result = forecaster.get_trend(&data, 1, 30, 7).unwrap();
        assert_eq!(result.history.len(), 3);
        assert_eq!(result.forecast.len(), 7);
        // mean(50, 60, 71) = 60.33 -> 60, repeated for every horizon day.
        for point in &result.forecast {
            assert_eq!(point.score, 60);
        }
    }

    #[test]
    fn five_weekday_points_fit_and_continue_the_line() {
        let forecaster = TrendForecaster::new();
        let data = rows(1, monday(), &[60.0, 65.0, 70.0, 75.0, 80.0]);

        let result = forecaster.get_trend(&data, 1, 30, 7).unwrap();
        assert_eq!(result.forecast.len(), 7);
        for point in &result.forecast {
            assert!((0..=100).contains(&point.score));
        }

        // Deterministic: the same input fits the same model.
        let again = forecaster.get_trend(&data, 1, 30, 7).unwrap();
        assert_eq!(result, again);
    }

    #[test]
    fn forecast_dates_continue_from_last_history_date() {
        let forecaster = TrendForecaster::new();
        let data = rows(1, monday(), &[60.0, 65.0, 70.0, 75.0, 80.0]);

        let result = forecaster.get_trend(&data, 1, 30, 3).unwrap();
        let last = result.history.last().unwrap().date;
        assert_eq!(result.forecast[0].date, last + Duration::days(1));
        assert_eq!(result.forecast[2].date, last + Duration::days(3));
    }

    #[test]
    fn window_takes_most_recent_records_only() {
        let forecaster = TrendForecaster::new();
        let data = rows(1, monday(), &[10.0; 40]);

        let result = forecaster.get_trend(&data, 1, 30, 7).unwrap();
        assert_eq!(result.history.len(), 30);
        assert_eq!(
            result.history[0].date,
            monday() + Duration::days(10)
        );
    }

    #[test]
    fn other_users_records_are_ignored() {
        let forecaster = TrendForecaster::new();
        let mut data = rows(1, monday(), &[40.0, 42.0]);
        data.extend(rows(2, monday(), &[95.0; 10]));

        let result = forecaster.get_trend(&data, 1, 30, 7).unwrap();
        assert_eq!(result.history.len(), 2);
        // Sparse fallback from user 1's data alone: mean(40, 42) = 41.
        assert_eq!(result.forecast[0].score, 41);
    }

    #[test]
    fn predictions_clip_to_score_bounds() {
        let forecaster = TrendForecaster::new();
        // Steep upward line quickly exceeds 100 without clipping.
        let data = rows(1, monday(), &[70.0, 80.0, 90.0, 95.0, 100.0]);

        let result = forecaster.get_trend(&data, 1, 30, 14).unwrap();
        for point in &result.forecast {
            assert!((0..=100).contains(&point.score));
        }
    }
}
