//! Data model: persisted daily rows and transient derived results.

pub mod ensemble;
pub mod forecast;
pub mod record;
pub mod streak;
pub mod summary;

pub use ensemble::{EnsembleReport, ModelPrediction};
pub use forecast::{ForecastPoint, ForecastResult, TrendDelta, TrendDirection};
pub use record::{
    mark_attendance_today, upsert_today, AttendanceRecord, AttendanceStatus, DailyRecord,
};
pub use streak::{StreakForecast, StreakPrediction};
pub use summary::{FocusArea, PredictionSummary, WorkloadLabel, WorkloadRisk};
