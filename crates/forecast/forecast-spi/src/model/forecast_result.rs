//! Forecast output model

use super::PeriodKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Forecasting strategy chosen by the model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    LinearRegression,
    ExponentialSmoothing,
    SeasonalDecomposition,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::LinearRegression => "linear-regression",
            ModelKind::ExponentialSmoothing => "exponential-smoothing",
            ModelKind::SeasonalDecomposition => "seasonal-decomposition",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the seasonality analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityProfile {
    pub detected: bool,
    pub period: usize,
    /// Share of de-trended variance explained by the seasonal component, in [0, 1].
    pub strength: f64,
}

impl SeasonalityProfile {
    pub fn not_detected(period: usize) -> Self {
        Self {
            detected: false,
            period,
            strength: 0.0,
        }
    }
}

/// Lower and upper forecast bounds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfidenceBounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Fit diagnostics attached to every forecast. Descriptive only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastMetadata {
    /// In-sample R² of the selected model; `None` when undefined.
    pub r2: Option<f64>,
    pub trend_slope: f64,
    pub seasonality: SeasonalityProfile,
    /// Coefficient of variation of the in-sample residuals.
    pub volatility: f64,
    pub data_points: usize,
    pub forecast_horizon: usize,
    pub historical_mean: f64,
    /// Sample standard deviation of the raw history.
    pub historical_std: f64,
    pub outliers_dampened: usize,
    /// Calendar months missing between observations.
    pub gaps: usize,
    /// The selected strategy was numerically degenerate and a flat mean
    /// forecast was substituted.
    pub fallback_applied: bool,
}

/// Forecast for one series.
///
/// `forecasted`, `confidence.lower`, `confidence.upper` and `periods` all
/// have one entry per horizon step, and `lower[i] <= forecasted[i] <= upper[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub method: ModelKind,
    pub forecasted: Vec<f64>,
    pub confidence: ConfidenceBounds,
    pub metadata: ForecastMetadata,
    pub periods: Vec<PeriodKey>,
}

impl ForecastResult {
    pub fn horizon(&self) -> usize {
        self.forecasted.len()
    }

    /// Width of the confidence band at each step.
    pub fn band_widths(&self) -> Vec<f64> {
        self.confidence
            .upper
            .iter()
            .zip(&self.confidence.lower)
            .map(|(u, l)| u - l)
            .collect()
    }
}
