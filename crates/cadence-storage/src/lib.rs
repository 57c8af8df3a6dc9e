//! # cadence-storage
//!
//! Durable flat-table stores for daily work metrics, one CSV table per
//! metric domain. Append/upsert semantics, full-table reads, and
//! reset-to-empty recovery when the backing file is unreadable.

pub mod attendance;
pub mod productivity;
pub mod seed;
mod table;

pub use attendance::AttendanceStore;
pub use productivity::ProductivityStore;
