//! Configuration structs with serde defaults backed by `constants`.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Cache subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum age of the cached raw series (seconds).
    pub series_ttl_secs: u64,
    /// Maximum age of a cached prediction summary (seconds).
    pub prediction_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            series_ttl_secs: constants::DEFAULT_CACHE_TTL_SECS,
            prediction_ttl_secs: constants::DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// Forecast subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Trailing history window, in days.
    pub history_days: usize,
    /// Forecast horizon, in days.
    pub horizon: usize,
    /// Minimum history points before a model is fitted.
    pub min_fit_points: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            history_days: constants::DEFAULT_HISTORY_DAYS,
            horizon: constants::DEFAULT_HORIZON,
            min_fit_points: constants::MIN_FIT_POINTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let cache = CacheConfig::default();
        assert_eq!(cache.series_ttl_secs, 300);
        assert_eq!(cache.prediction_ttl_secs, 300);

        let forecast = ForecastConfig::default();
        assert_eq!(forecast.history_days, 30);
        assert_eq!(forecast.horizon, 7);
        assert_eq!(forecast.min_fit_points, 5);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cache: CacheConfig = serde_json::from_str("{\"series_ttl_secs\": 60}").unwrap();
        assert_eq!(cache.series_ttl_secs, 60);
        assert_eq!(cache.prediction_ttl_secs, 300);
    }
}
