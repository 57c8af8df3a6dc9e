//! Attendance streak statistics and the geometric continuation model.

use cadence_core::constants::{
    GEOMETRIC_CLAMP_DAYS, GEOMETRIC_CLAMP_PROBABILITY, STREAK_SCAN_WINDOW,
};
use cadence_core::models::{AttendanceRecord, StreakForecast};

/// Trailing run of fully-present days, scanned over at most the last
/// [`STREAK_SCAN_WINDOW`] records of a chronologically sorted series.
pub fn current_streak(series: &[AttendanceRecord]) -> u32 {
    series
        .iter()
        .rev()
        .take(STREAK_SCAN_WINDOW)
        .take_while(|r| r.is_present())
        .count() as u32
}

/// Streak outlook given the ensemble's presence probability.
///
/// Treats each future day as an independent trial, so the expected
/// number of additional streak days is the geometric `p / (1 - p)`,
/// clamped to [`GEOMETRIC_CLAMP_DAYS`] once `p` reaches
/// [`GEOMETRIC_CLAMP_PROBABILITY`].
pub fn calculate_streak_forecast(
    series: &[AttendanceRecord],
    probability: f64,
) -> StreakForecast {
    let p = probability.clamp(0.0, 1.0);
    let expected_more_days = if p >= GEOMETRIC_CLAMP_PROBABILITY {
        GEOMETRIC_CLAMP_DAYS
    } else {
        round1(p / (1.0 - p))
    };

    StreakForecast {
        current_streak: current_streak(series),
        probability_continue: round1(p * 100.0),
        expected_more_days,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
