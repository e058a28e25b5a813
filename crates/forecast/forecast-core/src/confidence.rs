//! Confidence interval implementations
//!
//! Provides methods for computing prediction intervals for forecasts.

use crate::stats::std_dev;
use forecast_api::{ForecastConfig, DEFAULT_CONFIDENCE_LEVEL};
use forecast_spi::{ConfidenceBounds, ConfidenceIntervalComputer};

/// Forecast with confidence intervals
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastWithConfidence {
    /// Point forecast
    pub forecast: Vec<f64>,
    /// Lower bound of confidence interval
    pub lower: Vec<f64>,
    /// Upper bound of confidence interval
    pub upper: Vec<f64>,
}

impl ForecastWithConfidence {
    /// Create from point forecast and standard errors
    ///
    /// A step whose bounds would not be finite collapses onto the forecast.
    pub fn from_standard_errors(
        forecast: Vec<f64>,
        std_errors: &[f64],
        confidence_level: f64,
    ) -> Self {
        let z = z_score(confidence_level);

        let (lower, upper): (Vec<f64>, Vec<f64>) = forecast
            .iter()
            .zip(std_errors.iter())
            .map(|(&f, &se)| {
                let (lo, hi) = (f - z * se, f + z * se);
                if lo.is_finite() && hi.is_finite() {
                    (lo, hi)
                } else {
                    (f, f)
                }
            })
            .unzip();

        Self {
            forecast,
            lower,
            upper,
        }
    }

    /// Create confidence intervals based on historical residuals.
    ///
    /// The standard error grows with the square root of the horizon step.
    pub fn from_residuals(forecast: Vec<f64>, residuals: &[f64], confidence_level: f64) -> Self {
        let sigma = std_dev(residuals);
        let std_errors: Vec<f64> = (0..forecast.len())
            .map(|h| sigma * ((h + 1) as f64).sqrt())
            .collect();

        Self::from_standard_errors(forecast, &std_errors, confidence_level)
    }

    /// Constant-width band of `z * sigma` at every step.
    pub fn constant(forecast: Vec<f64>, sigma: f64, confidence_level: f64) -> Self {
        let std_errors = vec![sigma; forecast.len()];
        Self::from_standard_errors(forecast, &std_errors, confidence_level)
    }

    /// Clamp the lower bound at zero.
    pub fn clamp_non_negative(mut self) -> Self {
        for lower in self.lower.iter_mut() {
            *lower = lower.max(0.0);
        }
        self
    }

    pub fn into_bounds(self) -> ConfidenceBounds {
        ConfidenceBounds {
            lower: self.lower,
            upper: self.upper,
        }
    }
}

/// Residual-based interval computer with `sqrt(t)` widening.
#[derive(Debug, Clone)]
pub struct ResidualBandComputer {
    confidence_level: f64,
    non_negative: bool,
}

impl ResidualBandComputer {
    pub fn new(confidence_level: f64, non_negative: bool) -> Self {
        Self {
            confidence_level,
            non_negative,
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.confidence_level, config.non_negative)
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Constant band used with the flat fallback forecast.
    pub fn compute_constant(&self, forecast: &[f64], sigma: f64) -> ConfidenceBounds {
        let result = ForecastWithConfidence::constant(forecast.to_vec(), sigma, self.confidence_level);
        self.finish(result)
    }

    fn finish(&self, result: ForecastWithConfidence) -> ConfidenceBounds {
        if self.non_negative {
            result.clamp_non_negative().into_bounds()
        } else {
            result.into_bounds()
        }
    }
}

impl Default for ResidualBandComputer {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_LEVEL, true)
    }
}

impl ConfidenceIntervalComputer for ResidualBandComputer {
    fn compute(&self, forecast: &[f64], residuals: &[f64]) -> ConfidenceBounds {
        let result =
            ForecastWithConfidence::from_residuals(forecast.to_vec(), residuals, self.confidence_level);
        self.finish(result)
    }
}

/// Get z-score for a given confidence level
pub fn z_score(confidence_level: f64) -> f64 {
    match confidence_level {
        x if x >= 0.99 => 2.576,
        x if x >= 0.95 => 1.96,
        x if x >= 0.90 => 1.645,
        x if x >= 0.80 => 1.282,
        _ => 1.96, // default to 95%
    }
}
