/// Cadence system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum age of a cached series or prediction before it must be
/// recomputed from the backing store (seconds).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Minimum history points before the trend forecaster fits a model.
/// Below this the forecast flat-lines at the rounded history mean.
pub const MIN_FIT_POINTS: usize = 5;

/// Probability returned by an untrained or failed attendance model.
pub const FALLBACK_ATTENDANCE_PROBABILITY: f64 = 0.75;

/// Number of trailing records scanned when counting the attendance streak.
pub const STREAK_SCAN_WINDOW: usize = 14;

/// Ensemble probability at or above which the geometric streak expectation
/// is clamped instead of computed (p / (1 - p) blows up near 1).
pub const GEOMETRIC_CLAMP_PROBABILITY: f64 = 0.99;

/// Clamped expected streak continuation, in days.
pub const GEOMETRIC_CLAMP_DAYS: f64 = 10.0;

/// Mean score above which a low-variance history classifies as overwork.
pub const OVERWORK_MEAN_THRESHOLD: f64 = 82.0;

/// Score spread below which a high-mean history classifies as overwork.
pub const OVERWORK_STD_THRESHOLD: f64 = 8.0;

/// Mean score below which a history classifies as underwork.
pub const UNDERWORK_MEAN_THRESHOLD: f64 = 55.0;

/// Default trailing window for trend forecasts (days).
pub const DEFAULT_HISTORY_DAYS: usize = 30;

/// Default forecast horizon (days).
pub const DEFAULT_HORIZON: usize = 7;

/// Forecast score at or above which a day counts toward the expected
/// productive-streak duration.
pub const PRODUCTIVE_DAY_THRESHOLD: i32 = 70;
