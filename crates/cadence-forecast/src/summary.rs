//! Prediction summary assembly: cache-gated forecasting plus heuristic
//! risk and confidence scoring.

use tracing::debug;

use cadence_cache::CacheLayer;
use cadence_core::config::{CacheConfig, ForecastConfig};
use cadence_core::constants::{
    OVERWORK_MEAN_THRESHOLD, OVERWORK_STD_THRESHOLD, PRODUCTIVE_DAY_THRESHOLD,
    UNDERWORK_MEAN_THRESHOLD,
};
use cadence_core::errors::CadenceResult;
use cadence_core::models::{
    upsert_today, DailyRecord, FocusArea, ForecastResult, PredictionSummary, StreakPrediction,
    WorkloadLabel, WorkloadRisk,
};
use cadence_core::traits::{MessageGenerator, SeriesStore};

use crate::messages::{calculate_trend, DefaultMessages};
use crate::stats;
use crate::trend::TrendForecaster;

/// Confidence floor/ceiling and the spread cap feeding the formula
/// `confidence = 1 - min(std / 100, 0.6)`.
const CONFIDENCE_SPREAD_CAP: f64 = 0.6;
const CONFIDENCE_FLOOR: f64 = 0.4;
const CONFIDENCE_CEILING: f64 = 1.0;

/// Streak outlook at or above which the focus shifts to stretch goals.
const STRETCH_GOAL_DURATION: u32 = 5;

/// Assembles the per-user prediction summary.
///
/// Composes the cache layer, the trend forecaster and a message
/// generator. Summarization is total: data-availability problems return
/// the documented neutral summary instead of an error.
pub struct SummaryEngine<S, M = DefaultMessages>
where
    S: SeriesStore<Row = DailyRecord>,
    M: MessageGenerator,
{
    cache: CacheLayer<S, PredictionSummary>,
    forecaster: TrendForecaster,
    config: ForecastConfig,
    messages: M,
}

impl<S: SeriesStore<Row = DailyRecord>> SummaryEngine<S, DefaultMessages> {
    pub fn new(store: S, cache_config: &CacheConfig) -> Self {
        Self::with_messages(store, cache_config, ForecastConfig::default(), DefaultMessages)
    }
}

impl<S, M> SummaryEngine<S, M>
where
    S: SeriesStore<Row = DailyRecord>,
    M: MessageGenerator,
{
    pub fn with_messages(
        store: S,
        cache_config: &CacheConfig,
        config: ForecastConfig,
        messages: M,
    ) -> Self {
        Self {
            cache: CacheLayer::new(store, cache_config),
            forecaster: TrendForecaster::with_min_fit_points(config.min_fit_points),
            config,
            messages,
        }
    }

    pub fn cache(&self) -> &CacheLayer<S, PredictionSummary> {
        &self.cache
    }

    /// Record today's observed metrics without computing a summary.
    /// Invalidates every cached prediction.
    pub fn record_today(
        &self,
        user_id: i64,
        score: Option<f64>,
        completed: Option<u32>,
        total: Option<u32>,
    ) -> CadenceResult<()> {
        self.cache
            .write(|rows| upsert_today(rows, user_id, score, completed, total))?;
        Ok(())
    }

    /// Monthly calendar rollup for one user (current year by default).
    pub fn monthly(
        &self,
        user_id: i64,
        year: Option<i32>,
        month: Option<u32>,
    ) -> CadenceResult<stats::MonthlyStats> {
        let rows = self.cache.get_series()?;
        Ok(stats::monthly_stats(&rows, user_id, year, month))
    }

    /// Assemble the prediction summary for one user.
    ///
    /// A fresh cached summary short-circuits everything, including the
    /// model fit. Otherwise any supplied metrics are upserted first
    /// (which clears the whole prediction cache), the trend is
    /// recomputed, and the assembled summary is cached before returning.
    pub fn summarize(
        &self,
        user_id: i64,
        today_score: Option<f64>,
        completed: Option<u32>,
        total: Option<u32>,
    ) -> CadenceResult<PredictionSummary> {
        if let Some(cached) = self.cache.get_prediction(user_id) {
            debug!(user_id, "summary served from prediction cache");
            return Ok(cached);
        }

        if today_score.is_some() || completed.is_some() || total.is_some() {
            self.cache
                .write(|rows| upsert_today(rows, user_id, today_score, completed, total))?;
        }

        let rows = self.cache.get_series()?;
        let trend = self.forecaster.get_trend(
            &rows,
            user_id,
            self.config.history_days,
            self.config.horizon,
        )?;

        if trend.is_empty() {
            return Ok(insufficient_data_summary(trend));
        }

        let history_scores: Vec<f64> =
            trend.history.iter().map(|p| f64::from(p.score)).collect();
        let tomorrow = trend.forecast[0].score;
        let next_days: Vec<i32> = trend.forecast.iter().map(|p| p.score).collect();

        let historical_mean = stats::mean(&history_scores);
        let historical_std = stats::population_std(&history_scores);

        // Streak runs over the user's full series, not just the window.
        let mut user_scores: Vec<(chrono::NaiveDate, f64)> = rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| (r.date, r.score))
            .collect();
        user_scores.sort_by_key(|(date, _)| *date);
        let sorted_scores: Vec<f64> = user_scores.into_iter().map(|(_, s)| s).collect();

        let expected_duration = trend
            .forecast
            .iter()
            .filter(|p| p.score >= PRODUCTIVE_DAY_THRESHOLD)
            .count() as u32;

        let streak_prediction = StreakPrediction {
            current: stats::trailing_streak(&sorted_scores),
            continue_probability: tomorrow.clamp(0, 100) as u32,
            expected_duration,
            health: historical_mean.clamp(0.0, 100.0).round() as u32,
            message: format!(
                "Your streak is expected to continue for {expected_duration} more days."
            ),
        };

        let workload_risk = classify_workload(historical_mean, historical_std);
        let confidence = (1.0 - (historical_std / 100.0).min(CONFIDENCE_SPREAD_CAP))
            .clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING);

        let current = *history_scores.last().unwrap_or(&0.0);
        let previous = if history_scores.len() > 1 {
            history_scores[history_scores.len() - 2]
        } else {
            current
        };
        let trend_delta = calculate_trend(current, previous);
        let recommendation = self.messages.recommendation(
            current,
            &trend_delta,
            historical_mean.clamp(0.0, 100.0),
        );

        let focus_area = match workload_risk.label {
            WorkloadLabel::Overwork => FocusArea::Recovery,
            WorkloadLabel::Underwork => FocusArea::Execution,
            _ if expected_duration >= STRETCH_GOAL_DURATION => FocusArea::StretchGoals,
            _ => FocusArea::Consistency,
        };

        let summary = PredictionSummary {
            tomorrow_score: Some(tomorrow),
            next_7_days: next_days,
            streak_prediction,
            workload_risk,
            recommendation,
            focus_area,
            confidence,
            trend,
        };

        self.cache.put_prediction(user_id, summary.clone());
        Ok(summary)
    }
}

/// Pure threshold classifier over the window's mean and spread.
pub fn classify_workload(mean: f64, std: f64) -> WorkloadRisk {
    if mean > OVERWORK_MEAN_THRESHOLD && std < OVERWORK_STD_THRESHOLD {
        WorkloadRisk {
            label: WorkloadLabel::Overwork,
            description: "High sustained productivity may indicate overwork. Plan recovery windows."
                .to_string(),
        }
    } else if mean < UNDERWORK_MEAN_THRESHOLD {
        WorkloadRisk {
            label: WorkloadLabel::Underwork,
            description: "Your average productivity is low. Time to re-structure your day."
                .to_string(),
        }
    } else {
        WorkloadRisk {
            label: WorkloadLabel::Balanced,
            description: "Your workload looks balanced. Maintain your current pacing."
                .to_string(),
        }
    }
}

/// Documented neutral summary for users without enough history.
/// Not cached: the next call with data recomputes immediately.
fn insufficient_data_summary(trend: ForecastResult) -> PredictionSummary {
    PredictionSummary {
        tomorrow_score: None,
        next_7_days: Vec::new(),
        streak_prediction: StreakPrediction::insufficient_data(),
        workload_risk: WorkloadRisk::unknown(),
        recommendation: "Add more daily tasks so the forecaster can learn your pattern."
            .to_string(),
        focus_area: FocusArea::Consistency,
        confidence: 0.5,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workload_thresholds() {
        assert_eq!(classify_workload(85.0, 5.0).label, WorkloadLabel::Overwork);
        assert_eq!(classify_workload(85.0, 12.0).label, WorkloadLabel::Balanced);
        assert_eq!(classify_workload(50.0, 5.0).label, WorkloadLabel::Underwork);
        assert_eq!(classify_workload(70.0, 10.0).label, WorkloadLabel::Balanced);
    }

    #[test]
    fn confidence_formula_bounds() {
        // std = 0 -> 1.0; std = 20 -> 0.8; std >= 60 -> floor at 0.4.
        let confidence = |std: f64| {
            (1.0 - (std / 100.0).min(CONFIDENCE_SPREAD_CAP))
                .clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
        };
        assert_eq!(confidence(0.0), 1.0);
        assert!((confidence(20.0) - 0.8).abs() < 1e-9);
        assert_eq!(confidence(60.0), 0.4);
        assert_eq!(confidence(90.0), 0.4);
    }
}
