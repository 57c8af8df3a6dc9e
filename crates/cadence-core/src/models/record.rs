//! Persisted daily rows and the row-level upsert rules.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One productivity observation per (user, day).
///
/// Invariant: at most one row per (user_id, date); `completed <= total`
/// when both are supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub user_id: i64,
    pub date: NaiveDate,
    /// Productivity score, 0–100.
    pub score: f64,
    /// Tasks completed that day.
    pub completed: u32,
    /// Tasks assigned that day.
    pub total: u32,
}

/// One attendance observation per (user, day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub user_id: i64,
    pub date: NaiveDate,
    /// Presence weight: 0.0 absent, 0.5 half-day, 1.0 present.
    pub attendance: f64,
}

impl AttendanceRecord {
    /// A day only extends a streak when fully present.
    pub fn is_present(&self) -> bool {
        self.attendance >= 1.0
    }

    pub fn status(&self) -> AttendanceStatus {
        AttendanceStatus::from_weight(self.attendance)
    }
}

/// Tri-state daily presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Absent,
    HalfDay,
    Present,
}

impl AttendanceStatus {
    /// Numeric weight stored in the flat table.
    pub fn weight(self) -> f64 {
        match self {
            Self::Absent => 0.0,
            Self::HalfDay => 0.5,
            Self::Present => 1.0,
        }
    }

    /// Nearest status for a stored weight.
    pub fn from_weight(weight: f64) -> Self {
        if weight >= 0.75 {
            Self::Present
        } else if weight >= 0.25 {
            Self::HalfDay
        } else {
            Self::Absent
        }
    }
}

/// Upsert today's productivity row for `user_id` in place.
///
/// Supplied fields overwrite; omitted fields are left unchanged on an
/// existing row. Whenever `score` is omitted but task counts are given,
/// the score is re-derived as `completed / max(total, 1) * 100`, so the
/// most recent task ratio always wins. With nothing supplied a zeroed
/// row is written.
///
/// Exactly one row per (user_id, today) exists afterwards.
pub fn upsert_today(
    rows: &mut Vec<DailyRecord>,
    user_id: i64,
    score: Option<f64>,
    completed: Option<u32>,
    total: Option<u32>,
) {
    let today = Utc::now().date_naive();

    if let Some(row) = rows
        .iter_mut()
        .find(|r| r.user_id == user_id && r.date == today)
    {
        if let Some(c) = completed {
            row.completed = c;
        }
        if let Some(t) = total {
            row.total = t;
        }
        match score {
            Some(s) => row.score = s,
            None if completed.is_some() || total.is_some() => {
                row.score = f64::from(row.completed) / f64::from(row.total.max(1)) * 100.0;
            }
            None => {}
        }
        return;
    }

    let completed = completed.unwrap_or(0);
    let total = total.unwrap_or(0);
    let score =
        score.unwrap_or_else(|| f64::from(completed) / f64::from(total.max(1)) * 100.0);
    rows.push(DailyRecord {
        user_id,
        date: today,
        score,
        completed,
        total,
    });
}

/// Upsert today's attendance row for `user_id` in place.
pub fn mark_attendance_today(
    rows: &mut Vec<AttendanceRecord>,
    user_id: i64,
    status: AttendanceStatus,
) {
    let today = Utc::now().date_naive();

    if let Some(row) = rows
        .iter_mut()
        .find(|r| r.user_id == user_id && r.date == today)
    {
        row.attendance = status.weight();
        return;
    }

    rows.push(AttendanceRecord {
        user_id,
        date: today,
        attendance: status.weight(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_row_derives_score_from_task_ratio() {
        let mut rows = Vec::new();
        upsert_today(&mut rows, 1, None, Some(8), Some(10));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score, 80.0);
    }

    #[test]
    fn second_upsert_converges_not_accumulates() {
        let mut rows = Vec::new();
        upsert_today(&mut rows, 1, None, Some(2), Some(10));
        upsert_today(&mut rows, 1, None, Some(9), Some(10));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score, 90.0);
        assert_eq!(rows[0].completed, 9);
    }

    #[test]
    fn partial_update_keeps_unsupplied_fields() {
        let mut rows = Vec::new();
        upsert_today(&mut rows, 1, Some(70.0), Some(3), Some(6));
        upsert_today(&mut rows, 1, Some(55.0), None, None);
        assert_eq!(rows[0].score, 55.0);
        assert_eq!(rows[0].completed, 3);
        assert_eq!(rows[0].total, 6);
    }

    #[test]
    fn nothing_supplied_writes_zero_defaults() {
        let mut rows = Vec::new();
        upsert_today(&mut rows, 4, None, None, None);
        assert_eq!(rows[0].score, 0.0);
        assert_eq!(rows[0].completed, 0);
        assert_eq!(rows[0].total, 0);
    }

    #[test]
    fn zero_total_never_divides_by_zero() {
        let mut rows = Vec::new();
        upsert_today(&mut rows, 2, None, Some(3), Some(0));
        assert_eq!(rows[0].score, 300.0 / 1.0);
    }

    #[test]
    fn different_users_get_separate_rows() {
        let mut rows = Vec::new();
        upsert_today(&mut rows, 1, Some(60.0), None, None);
        upsert_today(&mut rows, 2, Some(80.0), None, None);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn status_weight_round_trip() {
        for status in [
            AttendanceStatus::Absent,
            AttendanceStatus::HalfDay,
            AttendanceStatus::Present,
        ] {
            assert_eq!(AttendanceStatus::from_weight(status.weight()), status);
        }
    }

    #[test]
    fn mark_attendance_overwrites_same_day() {
        let mut rows = Vec::new();
        mark_attendance_today(&mut rows, 1, AttendanceStatus::Present);
        mark_attendance_today(&mut rows, 1, AttendanceStatus::HalfDay);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].attendance, 0.5);
    }
}
