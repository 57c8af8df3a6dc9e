//! # cadence-prediction
//!
//! Attendance forecasting: a three-slot model ensemble, a geometric
//! streak expectation, and a cache-gated per-user report.
//!
//! Every slot implements [`cadence_core::traits::AttendanceModel`] and
//! absorbs its own failures, so a slot that cannot train degrades to a
//! fixed fallback probability instead of taking the ensemble down.

pub mod engine;
pub mod strategies;
pub mod streak;

pub use engine::{AttendanceEngine, EnsemblePredictor};
pub use strategies::{FeatureModel, SeasonalModel, WindowModel};
