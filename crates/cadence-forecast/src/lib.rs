//! # cadence-forecast
//!
//! Bounded-horizon productivity forecasting and summary assembly.
//!
//! | Piece | Role |
//! |-------|------|
//! | `regression` | Deterministic least-squares fit |
//! | `trend` | Trailing-window forecast with a sparse-data fallback |
//! | `stats` | Mean/spread/streak and monthly rollups |
//! | `messages` | Deterministic recommendation text |
//! | `summary` | Cache-gated assembly of the final summary |

pub mod messages;
pub mod regression;
pub mod stats;
pub mod summary;
pub mod trend;

pub use messages::DefaultMessages;
pub use regression::LinearModel;
pub use summary::SummaryEngine;
pub use trend::TrendForecaster;
