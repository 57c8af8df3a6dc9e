//! Series statistics: mean, spread, streaks, and monthly rollups.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use cadence_core::models::DailyRecord;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (the whole window is the population).
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Trailing run of positive scores over a chronologically sorted slice,
/// counted newest backward. Zero when the most recent score is not
/// positive.
pub fn trailing_streak(sorted_scores: &[f64]) -> u32 {
    sorted_scores
        .iter()
        .rev()
        .take_while(|&&score| score > 0.0)
        .count() as u32
}

/// Qualitative banding used on calendar views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductivityLevel {
    High,
    Medium,
    Low,
}

impl ProductivityLevel {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// One calendar day on a monthly view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub date: NaiveDate,
    pub score: i32,
    pub level: ProductivityLevel,
    pub completed: u32,
    pub total: u32,
}

/// Rollup over the selected year/month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: Option<u32>,
    pub average_score: f64,
    pub best_day: NaiveDate,
    pub worst_day: NaiveDate,
    pub days_tracked: usize,
    pub current_streak: u32,
}

/// Per-day stats plus a summary; `summary` is `None` when the selection
/// matched no rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub by_date: BTreeMap<NaiveDate, DayStats>,
    pub summary: Option<MonthlySummary>,
}

/// Per-day productivity stats for one user, filtered to `year` (default:
/// current) and optionally one `month`.
pub fn monthly_stats(
    rows: &[DailyRecord],
    user_id: i64,
    year: Option<i32>,
    month: Option<u32>,
) -> MonthlyStats {
    let year = year.unwrap_or_else(|| Utc::now().year());

    let mut selected: Vec<&DailyRecord> = rows
        .iter()
        .filter(|r| {
            r.user_id == user_id
                && r.date.year() == year
                && month.map_or(true, |m| r.date.month() == m)
        })
        .collect();
    selected.sort_by_key(|r| r.date);

    if selected.is_empty() {
        return MonthlyStats {
            by_date: BTreeMap::new(),
            summary: None,
        };
    }

    let by_date: BTreeMap<NaiveDate, DayStats> = selected
        .iter()
        .map(|r| {
            (
                r.date,
                DayStats {
                    date: r.date,
                    score: r.score.round() as i32,
                    level: ProductivityLevel::for_score(r.score),
                    completed: r.completed,
                    total: r.total,
                },
            )
        })
        .collect();

    let scores: Vec<f64> = selected.iter().map(|r| r.score).collect();
    let best = selected
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|r| r.date)
        .unwrap_or(selected[0].date);
    let worst = selected
        .iter()
        .min_by(|a, b| a.score.total_cmp(&b.score))
        .map(|r| r.date)
        .unwrap_or(selected[0].date);

    let average = (mean(&scores) * 10.0).round() / 10.0;

    MonthlyStats {
        by_date,
        summary: Some(MonthlySummary {
            year,
            month,
            average_score: average,
            best_day: best,
            worst_day: worst,
            days_tracked: selected.len(),
            current_streak: trailing_streak(&scores),
        }),
    }
}
