//! Linear trend estimation over a trailing window.

use crate::stats::ols;
use forecast_api::{ForecastConfig, DEFAULT_TREND_WINDOW};
use forecast_spi::{Result, TrendEstimator, TrendFit};

/// Least-squares trend over the most recent `window` observations.
///
/// The fitted line is expressed against the zero-based index of the full
/// series, so `value_at(n - 1)` is the trend at the last observation
/// regardless of the window.
#[derive(Debug, Clone)]
pub struct LinearTrendEstimator {
    window: usize,
}

impl LinearTrendEstimator {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.trend_window)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Index of the first observation inside the window for a series of
    /// length `n`.
    pub fn window_start(&self, n: usize) -> usize {
        n.saturating_sub(self.window)
    }
}

impl Default for LinearTrendEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_WINDOW)
    }
}

impl TrendEstimator for LinearTrendEstimator {
    fn estimate(&self, data: &[f64]) -> Result<TrendFit> {
        let start = self.window_start(data.len());
        ols(&data[start..], start)
    }
}
