//! Fit diagnostics.
//!
//! Descriptive statistics about a completed fit. Nothing here feeds back
//! into model selection.

use crate::stats::{mean, sample_std_dev, std_dev};
use forecast_spi::{ForecastMetadata, SeasonalityProfile};

/// Coefficient of determination of `fitted` against `actual`, clamped to [0, 1].
///
/// `None` for fewer than three points or when `actual` has no variance.
pub fn r_squared(actual: &[f64], fitted: &[f64]) -> Option<f64> {
    let n = actual.len().min(fitted.len());
    if n < 3 {
        return None;
    }
    let actual = &actual[..n];
    let m = mean(actual);
    let ss_tot: f64 = actual.iter().map(|a| (a - m).powi(2)).sum();
    let scale = (m * m).max(1.0) * n as f64;
    if ss_tot <= 1e-12 * scale {
        return None;
    }
    let ss_res: f64 = actual
        .iter()
        .zip(fitted)
        .map(|(a, f)| (a - f).powi(2))
        .sum();
    let r2 = 1.0 - ss_res / ss_tot;
    r2.is_finite().then(|| r2.clamp(0.0, 1.0))
}

/// Residual standard deviation relative to the level of `reference`.
///
/// Falls back to the mean absolute value when the mean is near zero, and
/// to `0.0` for an all-zero reference.
pub fn volatility(residuals: &[f64], reference: &[f64]) -> f64 {
    let sigma = std_dev(residuals);
    if sigma == 0.0 {
        return 0.0;
    }
    let m = mean(reference).abs();
    let mean_abs = mean(&reference.iter().map(|x| x.abs()).collect::<Vec<_>>());
    let level = if m > 1e-9 * mean_abs.max(f64::MIN_POSITIVE) { m } else { mean_abs };
    if level == 0.0 {
        0.0
    } else {
        sigma / level
    }
}

/// Inputs of the diagnostics report for one forecast.
#[derive(Debug, Clone)]
pub struct Diagnostics<'a> {
    /// Original observations, before outlier dampening
    pub raw: &'a [f64],
    /// In-sample fitted values of the selected strategy
    pub fitted: &'a [f64],
    /// Cleaned series minus fitted values
    pub residuals: &'a [f64],
    pub trend_slope: f64,
    pub seasonality: SeasonalityProfile,
    pub horizon: usize,
    pub outliers_dampened: usize,
    pub gaps: usize,
    pub fallback_applied: bool,
}

impl Diagnostics<'_> {
    pub fn report(&self) -> ForecastMetadata {
        ForecastMetadata {
            r2: r_squared(self.raw, self.fitted),
            trend_slope: self.trend_slope,
            seasonality: self.seasonality,
            volatility: volatility(self.residuals, self.raw),
            data_points: self.raw.len(),
            forecast_horizon: self.horizon,
            historical_mean: mean(self.raw),
            historical_std: sample_std_dev(self.raw),
            outliers_dampened: self.outliers_dampened,
            gaps: self.gaps,
            fallback_applied: self.fallback_applied,
        }
    }
}
