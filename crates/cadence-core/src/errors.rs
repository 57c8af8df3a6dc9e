//! Error taxonomy for the forecasting core.
//!
//! Deliberately small: storage corruption is recovered by resetting the
//! backing table, insufficient data surfaces as neutral fallback values,
//! and model-fit failures leave a model untrained. None of those are
//! errors here. Only invalid call patterns and hard I/O failures reach
//! the caller.

/// Errors surfaced by the cadence core.
#[derive(Debug, thiserror::Error)]
pub enum CadenceError {
    #[error("storage error: {message}")]
    Storage { message: String },

    #[error("invalid forecast horizon: {value}")]
    InvalidHorizon { value: usize },

    #[error("invalid history window: {value}")]
    InvalidWindow { value: usize },
}

impl CadenceError {
    /// Build a storage error from any displayable cause.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CadenceError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err.to_string())
    }
}

pub type CadenceResult<T> = Result<T, CadenceError>;
