use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use cadence_core::models::AttendanceRecord;
use cadence_prediction::streak::{calculate_streak_forecast, current_streak};
use cadence_prediction::EnsemblePredictor;

fn series(weights: &[f64]) -> Vec<AttendanceRecord> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    weights
        .iter()
        .enumerate()
        .map(|(i, &attendance)| AttendanceRecord {
            user_id: 1,
            date: start + Duration::days(i as i64),
            attendance,
        })
        .collect()
}

fn weight_vec(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(prop_oneof![Just(0.0), Just(0.5), Just(1.0)], 0..max_len)
}

proptest! {
    #[test]
    fn continue_probability_is_a_percentage(p in 0.0f64..=1.0) {
        let forecast = calculate_streak_forecast(&[], p);
        prop_assert!((0.0..=100.0).contains(&forecast.probability_continue));
        prop_assert!(forecast.expected_more_days >= 0.0);
        prop_assert!(forecast.expected_more_days.is_finite());
    }

    #[test]
    fn near_certainty_always_clamps(p in 0.99f64..=1.0) {
        prop_assert_eq!(calculate_streak_forecast(&[], p).expected_more_days, 10.0);
    }

    #[test]
    fn streak_respects_series_and_window_bounds(weights in weight_vec(60)) {
        let data = series(&weights);
        let streak = current_streak(&data) as usize;
        prop_assert!(streak <= data.len());
        prop_assert!(streak <= 14);
    }

    #[test]
    fn report_values_stay_bounded(weights in weight_vec(80)) {
        let data = series(&weights);
        let mut predictor = EnsemblePredictor::new();
        predictor.train_all(&data);
        let report = predictor.predict_all(&data);

        for prediction in &report.per_model {
            prop_assert!((0.0..=1.0).contains(&prediction.probability));
        }
        prop_assert!((0.0..=1.0).contains(&report.average_prediction));
        prop_assert!((0.0..=1.0).contains(&report.absence_likelihood));
        prop_assert_eq!(report.next_week_forecast.len(), 7);
        for p in &report.next_week_forecast {
            prop_assert!((0.0..=1.0).contains(p));
        }
    }
}
