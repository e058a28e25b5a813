//! Forecast Consumer API
//!
//! Configuration for the forecasting engine.
//!
//! This crate provides:
//! - Named defaults for every tunable of the engine
//! - [`ForecastConfig`] with builder methods and validation
//! - [`GapPolicy`] for series with missing months
//! - Re-exports from SPI for convenience

// Re-export from SPI
pub use forecast_spi::{
    ConfidenceBounds, ForecastError, ForecastMetadata, ForecastResult, HistoricalSeries,
    ModelKind, MonthlySeriesPoint, PeriodKey, Result, SeasonalityProfile, MAX_HORIZON,
};

use serde::{Deserialize, Serialize};

/// Candidate seasonal period for monthly data (annual cycle).
pub const DEFAULT_PERIOD: usize = 12;
/// MAD multiplier above which an observation is treated as an outlier.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 3.5;
/// Seasonal strength above which seasonality is reported as detected.
pub const DEFAULT_SEASONALITY_THRESHOLD: f64 = 0.3;
/// Per-step trend damping factor φ.
pub const DEFAULT_DAMPING: f64 = 0.95;
/// Trailing window, in months, used for the trend fit.
pub const DEFAULT_TREND_WINDOW: usize = 36;
/// Smallest allowed trend window.
pub const MIN_TREND_WINDOW: usize = 24;
/// Two-sided confidence level of the forecast band.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;
/// Minimum number of observations accepted by the engine.
pub const DEFAULT_MIN_HISTORY: usize = 6;
/// History length from which exponential smoothing is preferred.
pub const SMOOTHING_MIN_HISTORY: usize = 12;
/// History length from which seasonal decomposition may be selected.
pub const SEASONAL_MIN_HISTORY: usize = 24;

/// How the engine treats missing months between observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Forecast anyway; gaps are logged and counted in the metadata.
    #[default]
    Tolerate,
    /// Fail with `InvalidSeries` when any month is missing.
    Reject,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastConfig {
    /// Candidate seasonal period in months
    pub period: usize,
    /// MAD multiplier `k` for outlier flagging
    pub outlier_threshold: f64,
    /// Seasonal strength threshold in (0, 1)
    pub seasonality_threshold: f64,
    /// Trend damping factor φ in (0, 1]
    pub damping: f64,
    /// Trailing trend window in months
    pub trend_window: usize,
    /// Confidence level of the forecast band
    pub confidence_level: f64,
    /// Minimum accepted history length
    pub min_history: usize,
    /// Clamp forecasts and lower bounds at zero
    pub non_negative: bool,
    /// Treatment of missing months
    pub gap_policy: GapPolicy,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
            seasonality_threshold: DEFAULT_SEASONALITY_THRESHOLD,
            damping: DEFAULT_DAMPING,
            trend_window: DEFAULT_TREND_WINDOW,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            min_history: DEFAULT_MIN_HISTORY,
            non_negative: true,
            gap_policy: GapPolicy::Tolerate,
        }
    }
}

impl ForecastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    pub fn with_outlier_threshold(mut self, k: f64) -> Self {
        self.outlier_threshold = k;
        self
    }

    pub fn with_seasonality_threshold(mut self, threshold: f64) -> Self {
        self.seasonality_threshold = threshold;
        self
    }

    pub fn with_damping(mut self, phi: f64) -> Self {
        self.damping = phi;
        self
    }

    pub fn with_trend_window(mut self, months: usize) -> Self {
        self.trend_window = months;
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn with_min_history(mut self, points: usize) -> Self {
        self.min_history = points;
        self
    }

    pub fn with_non_negative(mut self, non_negative: bool) -> Self {
        self.non_negative = non_negative;
        self
    }

    pub fn with_gap_policy(mut self, policy: GapPolicy) -> Self {
        self.gap_policy = policy;
        self
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<()> {
        if self.period < 2 {
            return Err(ForecastError::invalid_parameter(
                "period",
                "must be at least 2",
            ));
        }
        if !(self.outlier_threshold.is_finite() && self.outlier_threshold > 0.0) {
            return Err(ForecastError::invalid_parameter(
                "outlierThreshold",
                "must be a positive number",
            ));
        }
        if !(self.seasonality_threshold > 0.0 && self.seasonality_threshold < 1.0) {
            return Err(ForecastError::invalid_parameter(
                "seasonalityThreshold",
                "must be in (0, 1)",
            ));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ForecastError::invalid_parameter(
                "damping",
                "must be in (0, 1]",
            ));
        }
        if !(MIN_TREND_WINDOW..=DEFAULT_TREND_WINDOW).contains(&self.trend_window) {
            return Err(ForecastError::invalid_parameter(
                "trendWindow",
                format!(
                    "must be between {} and {} months",
                    MIN_TREND_WINDOW, DEFAULT_TREND_WINDOW
                ),
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ForecastError::invalid_parameter(
                "confidenceLevel",
                "must be in (0, 1)",
            ));
        }
        if self.min_history < 2 {
            return Err(ForecastError::invalid_parameter(
                "minHistory",
                "must be at least 2",
            ));
        }
        Ok(())
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ForecastConfig, GapPolicy};
    pub use forecast_spi::{
        ForecastError, ForecastResult, HistoricalSeries, ModelKind, MonthlySeriesPoint, PeriodKey,
        Result,
    };
}
