//! Deterministic demo-data backfill.
//!
//! Explicitly outside the forecasting core: nothing in the engines calls
//! this module, and seeded rows silently mixed into a live series would
//! skew trend and confidence numbers. Callers opt in, typically once,
//! when standing up a demo environment.
//!
//! The generated pattern is static (weekday cycle, weekend dips), so
//! repeated runs produce identical rows and never touch today or any
//! date that already has real data.

use chrono::{Datelike, Duration, Utc};
use tracing::info;

use cadence_core::errors::CadenceResult;
use cadence_core::models::{AttendanceRecord, DailyRecord};
use cadence_core::traits::SeriesStore;

use crate::{AttendanceStore, ProductivityStore};

/// Deterministic score wobble cycle applied on top of the base score.
const SCORE_CYCLE: [i32; 5] = [-8, -3, 0, 4, 9];

/// Backfill up to `days` of productivity history for `user_id`.
/// Returns the number of rows added.
pub fn backfill_productivity(
    store: &ProductivityStore,
    user_id: i64,
    days: u32,
) -> CadenceResult<usize> {
    let mut rows = store.load()?;
    let today = Utc::now().date_naive();

    let mut added = 0;
    for i in 1..=i64::from(days) {
        let date = today - Duration::days(i);
        if rows.iter().any(|r| r.user_id == user_id && r.date == date) {
            continue;
        }

        let weekend = date.weekday().number_from_monday() >= 6;
        let base = if weekend { 60 } else { 70 };
        let score = (base + SCORE_CYCLE[(i as usize) % SCORE_CYCLE.len()]).clamp(35, 95);
        let total = 4 + (i as u32) % 6;
        let completed = ((f64::from(score) / 100.0) * f64::from(total)).round() as u32;

        rows.push(DailyRecord {
            user_id,
            date,
            score: f64::from(score),
            completed,
            total,
        });
        added += 1;
    }

    if added > 0 {
        rows.sort_by_key(|r| (r.user_id, r.date));
        store.save(&rows)?;
        info!(user_id, added, "backfilled productivity history");
    }
    Ok(added)
}

/// Backfill up to `days` of attendance history for `user_id`.
/// Weekends are absent; weekdays repeat a present/present/half/absent
/// cycle. Returns the number of rows added.
pub fn backfill_attendance(
    store: &AttendanceStore,
    user_id: i64,
    days: u32,
) -> CadenceResult<usize> {
    let mut rows = store.load()?;
    let today = Utc::now().date_naive();

    let mut added = 0;
    for i in 1..=i64::from(days) {
        let date = today - Duration::days(i);
        if rows.iter().any(|r| r.user_id == user_id && r.date == date) {
            continue;
        }

        let weekend = date.weekday().number_from_monday() >= 6;
        let attendance = if weekend {
            0.0
        } else {
            match i % 4 {
                0 => 0.0,
                3 => 0.5,
                _ => 1.0,
            }
        };

        rows.push(AttendanceRecord {
            user_id,
            date,
            attendance,
        });
        added += 1;
    }

    if added > 0 {
        rows.sort_by_key(|r| (r.user_id, r.date));
        store.save(&rows)?;
        info!(user_id, added, "backfilled attendance history");
    }
    Ok(added)
}
