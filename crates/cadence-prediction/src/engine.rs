//! The ensemble and its cache-gated per-user reporting front.

use std::sync::Mutex;

use tracing::debug;

use cadence_cache::CacheLayer;
use cadence_core::config::CacheConfig;
use cadence_core::constants::{DEFAULT_HORIZON, FALLBACK_ATTENDANCE_PROBABILITY};
use cadence_core::errors::CadenceResult;
use cadence_core::models::{
    mark_attendance_today, AttendanceRecord, AttendanceStatus, EnsembleReport, ModelPrediction,
};
use cadence_core::traits::{AttendanceModel, SeriesStore};

use crate::strategies::{FeatureModel, SeasonalModel, WindowModel};
use crate::streak::calculate_streak_forecast;

/// Slot whose `forecast` supplies the multi-day outlook (the seasonal
/// model in the standard lineup).
const HORIZON_SLOT: usize = 1;

/// Fixed lineup of attendance model slots combined by arithmetic mean.
///
/// Slots never abort the ensemble: an untrained slot contributes its
/// fallback probability, so the report degrades gracefully as history
/// shrinks.
pub struct EnsemblePredictor {
    models: Vec<Box<dyn AttendanceModel>>,
    horizon: usize,
}

impl EnsemblePredictor {
    /// The standard three-slot lineup: feature, seasonal, window.
    pub fn new() -> Self {
        Self::with_models(
            vec![
                Box::new(FeatureModel::new()),
                Box::new(SeasonalModel::new()),
                Box::new(WindowModel::new()),
            ],
            DEFAULT_HORIZON,
        )
    }

    pub fn with_models(models: Vec<Box<dyn AttendanceModel>>, horizon: usize) -> Self {
        Self { models, horizon }
    }

    /// Fit every slot on a chronologically sorted single-user series.
    /// Returns (slot name, trained) per slot; a failed fit leaves that
    /// slot on its fallback probability.
    pub fn train_all(&mut self, series: &[AttendanceRecord]) -> Vec<(&'static str, bool)> {
        self.models
            .iter_mut()
            .map(|model| {
                let trained = model.train(series);
                debug!(model = model.name(), trained, rows = series.len(), "slot fitted");
                (model.name(), trained)
            })
            .collect()
    }

    /// Assemble the full ensemble report for one sorted series.
    pub fn predict_all(&self, series: &[AttendanceRecord]) -> EnsembleReport {
        if self.models.is_empty() {
            let p = FALLBACK_ATTENDANCE_PROBABILITY;
            return EnsembleReport {
                per_model: Vec::new(),
                next_week_forecast: vec![round3(p); self.horizon],
                streak_prediction: calculate_streak_forecast(series, p),
                absence_likelihood: round3(1.0 - p),
                average_prediction: round3(p),
            };
        }

        let per_model: Vec<ModelPrediction> = self
            .models
            .iter()
            .map(|model| ModelPrediction {
                model: model.name().to_string(),
                probability: round3(model.predict(series).clamp(0.0, 1.0)),
            })
            .collect();
        let average =
            per_model.iter().map(|p| p.probability).sum::<f64>() / per_model.len() as f64;

        let horizon_model = self.models.get(HORIZON_SLOT).unwrap_or(&self.models[0]);
        let next_week_forecast: Vec<f64> = horizon_model
            .forecast(series, self.horizon)
            .into_iter()
            .map(|p| round3(p.clamp(0.0, 1.0)))
            .collect();

        EnsembleReport {
            per_model,
            next_week_forecast,
            streak_prediction: calculate_streak_forecast(series, average),
            absence_likelihood: round3(1.0 - average),
            average_prediction: round3(average),
        }
    }
}

impl Default for EnsemblePredictor {
    fn default() -> Self {
        Self::new()
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Cache-gated attendance reporting over one attendance store.
///
/// The fit only runs on a prediction-cache miss; any write through
/// [`AttendanceEngine::mark_today`] flushes every cached report.
pub struct AttendanceEngine<S: SeriesStore<Row = AttendanceRecord>> {
    cache: CacheLayer<S, EnsembleReport>,
    predictor: Mutex<EnsemblePredictor>,
}

impl<S: SeriesStore<Row = AttendanceRecord>> AttendanceEngine<S> {
    pub fn new(store: S, config: &CacheConfig) -> Self {
        Self::with_predictor(store, config, EnsemblePredictor::new())
    }

    pub fn with_predictor(
        store: S,
        config: &CacheConfig,
        predictor: EnsemblePredictor,
    ) -> Self {
        Self {
            cache: CacheLayer::new(store, config),
            predictor: Mutex::new(predictor),
        }
    }

    pub fn cache(&self) -> &CacheLayer<S, EnsembleReport> {
        &self.cache
    }

    /// Record today's attendance status for `user_id`.
    pub fn mark_today(&self, user_id: i64, status: AttendanceStatus) -> CadenceResult<()> {
        self.cache
            .write(|rows| mark_attendance_today(rows, user_id, status))?;
        Ok(())
    }

    /// The ensemble report for one user; trains and predicts only when
    /// no fresh cached report exists.
    pub fn report(&self, user_id: i64) -> CadenceResult<EnsembleReport> {
        if let Some(cached) = self.cache.get_prediction(user_id) {
            debug!(user_id, "attendance report served from cache");
            return Ok(cached);
        }

        let rows = self.cache.get_series()?;
        let mut series: Vec<AttendanceRecord> =
            rows.into_iter().filter(|r| r.user_id == user_id).collect();
        series.sort_by_key(|r| r.date);

        let mut predictor = self.predictor.lock().expect("predictor lock poisoned");
        predictor.train_all(&series);
        let report = predictor.predict_all(&series);
        debug!(
            user_id,
            rows = series.len(),
            average = report.average_prediction,
            "attendance report assembled"
        );
        self.cache.put_prediction(user_id, report.clone());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, f64);

    impl AttendanceModel for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }
        fn train(&mut self, _series: &[AttendanceRecord]) -> bool {
            true
        }
        fn predict(&self, _series: &[AttendanceRecord]) -> f64 {
            self.1
        }
        fn is_trained(&self) -> bool {
            true
        }
    }

    fn stub_predictor(probabilities: [f64; 3]) -> EnsemblePredictor {
        EnsemblePredictor::with_models(
            vec![
                Box::new(Fixed("a", probabilities[0])),
                Box::new(Fixed("b", probabilities[1])),
                Box::new(Fixed("c", probabilities[2])),
            ],
            7,
        )
    }

    #[test]
    fn average_and_absence_are_complementary() {
        let report = stub_predictor([0.9, 0.8, 0.85]).predict_all(&[]);
        assert_eq!(report.average_prediction, 0.85);
        assert_eq!(report.absence_likelihood, 0.15);
        assert_eq!(report.per_model.len(), 3);
        assert_eq!(report.per_model[0].model, "a");
    }

    #[test]
    fn horizon_forecast_comes_from_the_second_slot() {
        let report = stub_predictor([0.2, 0.6, 0.9]).predict_all(&[]);
        // Fixed models repeat predict over the horizon.
        assert_eq!(report.next_week_forecast, vec![0.6; 7]);
    }

    #[test]
    fn out_of_range_probabilities_are_clamped() {
        let report = stub_predictor([1.5, -0.5, 0.5]).predict_all(&[]);
        assert_eq!(report.per_model[0].probability, 1.0);
        assert_eq!(report.per_model[1].probability, 0.0);
    }

    #[test]
    fn empty_lineup_reports_the_fallback() {
        let predictor = EnsemblePredictor::with_models(Vec::new(), 7);
        let report = predictor.predict_all(&[]);
        assert_eq!(report.average_prediction, 0.75);
        assert_eq!(report.absence_likelihood, 0.25);
        assert!(report.per_model.is_empty());
        assert_eq!(report.next_week_forecast.len(), 7);
    }

    #[test]
    fn untrained_standard_lineup_averages_the_fallback() {
        let mut predictor = EnsemblePredictor::new();
        let results = predictor.train_all(&[]);
        assert!(results.iter().all(|(_, trained)| !trained));

        let report = predictor.predict_all(&[]);
        assert_eq!(report.average_prediction, 0.75);
        for prediction in &report.per_model {
            assert_eq!(prediction.probability, 0.75);
        }
    }
}
