//! End-to-end attendance reporting over a real flat-file store.

use chrono::{Duration, Utc};
use tempfile::TempDir;

use cadence_core::config::CacheConfig;
use cadence_core::models::{AttendanceRecord, AttendanceStatus};
use cadence_core::traits::SeriesStore;
use cadence_prediction::AttendanceEngine;
use cadence_storage::AttendanceStore;

/// Seed `weights` as one row per day ending today for `user_id`.
fn seeded_engine(
    dir: &TempDir,
    user_id: i64,
    weights: &[f64],
) -> AttendanceEngine<AttendanceStore> {
    let store = AttendanceStore::open(dir.path()).unwrap();
    let today = Utc::now().date_naive();
    let rows: Vec<AttendanceRecord> = weights
        .iter()
        .rev()
        .enumerate()
        .map(|(back, &attendance)| AttendanceRecord {
            user_id,
            date: today - Duration::days(back as i64),
            attendance,
        })
        .collect();
    store.save(&rows).unwrap();
    AttendanceEngine::new(store, &CacheConfig::default())
}

#[test]
fn empty_history_reports_pure_fallback() {
    let dir = TempDir::new().unwrap();
    let store = AttendanceStore::open(dir.path()).unwrap();
    let engine = AttendanceEngine::new(store, &CacheConfig::default());

    let report = engine.report(1).unwrap();
    assert_eq!(report.average_prediction, 0.75);
    assert_eq!(report.per_model.len(), 3);
    assert_eq!(report.streak_prediction.current_streak, 0);
}

#[test]
fn steady_presence_yields_a_confident_report() {
    let dir = TempDir::new().unwrap();
    let engine = seeded_engine(&dir, 1, &[1.0; 45]);

    let report = engine.report(1).unwrap();
    assert_eq!(report.per_model.len(), 3);
    for prediction in &report.per_model {
        assert!((0.0..=1.0).contains(&prediction.probability));
    }
    assert!(report.average_prediction > 0.9);
    assert_eq!(report.next_week_forecast.len(), 7);
    // Streak scan is capped at the trailing 14 records.
    assert_eq!(report.streak_prediction.current_streak, 14);
    assert!(
        (report.average_prediction + report.absence_likelihood - 1.0).abs() < 1e-3
    );
}

#[test]
fn repeated_reports_are_served_from_cache() {
    let dir = TempDir::new().unwrap();
    let engine = seeded_engine(&dir, 1, &[1.0; 45]);

    let first = engine.report(1).unwrap();
    let second = engine.report(1).unwrap();
    assert_eq!(first, second);
}

#[test]
fn marking_today_invalidates_the_cached_report() {
    let dir = TempDir::new().unwrap();
    let engine = seeded_engine(&dir, 1, &[1.0; 45]);

    let before = engine.report(1).unwrap();
    assert_eq!(before.streak_prediction.current_streak, 14);

    engine.mark_today(1, AttendanceStatus::Absent).unwrap();
    let after = engine.report(1).unwrap();
    assert_eq!(after.streak_prediction.current_streak, 0);
}

#[test]
fn half_days_do_not_extend_the_streak() {
    let dir = TempDir::new().unwrap();
    let mut weights = vec![1.0; 20];
    weights.push(0.5);
    let engine = seeded_engine(&dir, 1, &weights);

    let report = engine.report(1).unwrap();
    assert_eq!(report.streak_prediction.current_streak, 0);
}

#[test]
fn users_are_reported_independently() {
    let dir = TempDir::new().unwrap();
    let engine = seeded_engine(&dir, 1, &[1.0; 45]);
    engine
        .cache()
        .write(|rows| {
            let today = Utc::now().date_naive();
            for back in 0..45 {
                rows.push(AttendanceRecord {
                    user_id: 2,
                    date: today - Duration::days(back),
                    attendance: 0.0,
                });
            }
        })
        .unwrap();

    let present = engine.report(1).unwrap();
    let absent = engine.report(2).unwrap();
    assert!(present.average_prediction > absent.average_prediction);
    assert_eq!(absent.streak_prediction.current_streak, 0);
}
