//! # cadence-core
//!
//! Foundation crate for the Cadence work-metrics system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{CacheConfig, ForecastConfig};
pub use errors::{CadenceError, CadenceResult};
pub use models::{
    AttendanceRecord, AttendanceStatus, DailyRecord, EnsembleReport, ForecastPoint,
    ForecastResult, PredictionSummary, StreakForecast, StreakPrediction, TrendDelta,
    TrendDirection, WorkloadLabel, WorkloadRisk,
};
pub use traits::{AttendanceModel, MessageGenerator, SeriesStore};
