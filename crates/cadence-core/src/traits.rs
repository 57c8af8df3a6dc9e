//! Capability seams between the core components.

use crate::errors::CadenceResult;
use crate::models::{AttendanceRecord, TrendDelta};

/// Durable full-table access to one flat daily store.
pub trait SeriesStore: Send + Sync {
    type Row: Clone + Send + Sync;

    /// Read the backing table in full.
    ///
    /// Missing or corrupt backing data resets to an empty table and
    /// returns it; the caller never sees a hard failure for that path.
    fn load(&self) -> CadenceResult<Vec<Self::Row>>;

    /// Persist the full table.
    fn save(&self, rows: &[Self::Row]) -> CadenceResult<()>;
}

/// One attendance model slot of the ensemble.
///
/// Implementations absorb their own failures: `train` reports success as
/// a boolean and `predict` falls back to a fixed probability when the
/// model is untrained, so one bad slot never aborts the ensemble.
pub trait AttendanceModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fit on a chronologically sorted series. Returns false when there
    /// is too little data or the fit degenerates.
    fn train(&mut self, series: &[AttendanceRecord]) -> bool;

    /// Tomorrow's presence probability in [0, 1].
    fn predict(&self, series: &[AttendanceRecord]) -> f64;

    /// Multi-day probability forecast. Models without a real horizon
    /// repeat tomorrow's estimate.
    fn forecast(&self, series: &[AttendanceRecord], days: usize) -> Vec<f64> {
        vec![self.predict(series); days]
    }

    fn is_trained(&self) -> bool;
}

/// Deterministic natural-language recommendation source.
///
/// An external collaborator seam: the web layer may plug in a richer
/// generator, the core ships a deterministic default.
pub trait MessageGenerator: Send + Sync {
    fn recommendation(&self, score: f64, trend: &TrendDelta, efficiency: f64) -> String;
}
