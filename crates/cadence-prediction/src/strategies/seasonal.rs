//! Weekly-seasonal attendance model: linear trend plus weekday offsets.

use chrono::{Datelike, Duration, NaiveDate};

use cadence_core::constants::FALLBACK_ATTENDANCE_PROBABILITY;
use cadence_core::models::AttendanceRecord;
use cadence_core::traits::AttendanceModel;
use cadence_forecast::LinearModel;

/// Minimum rows before the weekly decomposition is attempted.
const MIN_ROWS: usize = 30;

struct SeasonalFit {
    trend: LinearModel,
    /// Mean residual per weekday, Monday first.
    weekday_offsets: [f64; 7],
}

/// Decomposes the series into a linear trend over the index and a mean
/// residual per weekday. The only slot with a real multi-day horizon:
/// `forecast` walks the calendar so each future day gets its own weekday
/// offset.
pub struct SeasonalModel {
    fit: Option<SeasonalFit>,
}

impl SeasonalModel {
    pub fn new() -> Self {
        Self { fit: None }
    }

    fn value_at(fit: &SeasonalFit, index: usize, date: NaiveDate) -> f64 {
        let weekday = date.weekday().num_days_from_monday() as usize;
        (fit.trend.predict(&[index as f64]) + fit.weekday_offsets[weekday]).clamp(0.0, 1.0)
    }
}

impl Default for SeasonalModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceModel for SeasonalModel {
    fn name(&self) -> &'static str {
        "seasonal"
    }

    fn train(&mut self, series: &[AttendanceRecord]) -> bool {
        if series.len() < MIN_ROWS {
            self.fit = None;
            return false;
        }

        let features: Vec<Vec<f64>> = (0..series.len()).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = series.iter().map(|r| r.attendance).collect();
        let Some(trend) = LinearModel::fit(&features, &targets) else {
            self.fit = None;
            return false;
        };

        let mut sums = [0.0; 7];
        let mut counts = [0usize; 7];
        for (i, record) in series.iter().enumerate() {
            let weekday = record.date.weekday().num_days_from_monday() as usize;
            sums[weekday] += record.attendance - trend.predict(&[i as f64]);
            counts[weekday] += 1;
        }
        let mut weekday_offsets = [0.0; 7];
        for (offset, (&sum, &count)) in
            weekday_offsets.iter_mut().zip(sums.iter().zip(&counts))
        {
            if count > 0 {
                *offset = sum / count as f64;
            }
        }

        self.fit = Some(SeasonalFit {
            trend,
            weekday_offsets,
        });
        true
    }

    fn predict(&self, series: &[AttendanceRecord]) -> f64 {
        let Some(fit) = &self.fit else {
            return FALLBACK_ATTENDANCE_PROBABILITY;
        };
        let Some(last) = series.last() else {
            return FALLBACK_ATTENDANCE_PROBABILITY;
        };
        Self::value_at(fit, series.len(), last.date + Duration::days(1))
    }

    fn forecast(&self, series: &[AttendanceRecord], days: usize) -> Vec<f64> {
        let (Some(fit), Some(last)) = (&self.fit, series.last()) else {
            return vec![FALLBACK_ATTENDANCE_PROBABILITY; days];
        };
        (1..=days)
            .map(|offset| {
                Self::value_at(
                    fit,
                    series.len() + offset - 1,
                    last.date + Duration::days(offset as i64),
                )
            })
            .collect()
    }

    fn is_trained(&self) -> bool {
        self.fit.is_some()
    }
}
