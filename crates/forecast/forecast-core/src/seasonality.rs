//! Seasonality detection implementations
//!
//! Variance-ratio seasonal strength over an additive decomposition.

use crate::decomposition::decompose_additive;
use crate::stats::{mean, variance};
use forecast_api::{ForecastConfig, DEFAULT_SEASONALITY_THRESHOLD};
use forecast_spi::{DecompositionResult, SeasonalityDetector, SeasonalityProfile};

/// Seasonal analyzer for a fixed candidate period.
///
/// Strength is `var(seasonal) / var(detrended)` clamped to [0, 1];
/// seasonality is detected when strength exceeds the threshold and the
/// series covers at least two full cycles.
#[derive(Debug, Clone)]
pub struct SeasonalAnalyzer {
    threshold: f64,
}

impl SeasonalAnalyzer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.seasonality_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Analyze `data` and return the decomposition the profile was derived from.
    pub fn analyze_with_decomposition(
        &self,
        data: &[f64],
        period: usize,
    ) -> (SeasonalityProfile, DecompositionResult) {
        let decomposition = decompose_additive(data, period);
        if decomposition.seasonal_indices.is_empty() {
            return (SeasonalityProfile::not_detected(period), decomposition);
        }

        let strength = seasonal_strength(data, &decomposition);
        let profile = SeasonalityProfile {
            detected: strength > self.threshold,
            period,
            strength,
        };
        (profile, decomposition)
    }
}

impl Default for SeasonalAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_SEASONALITY_THRESHOLD)
    }
}

impl SeasonalityDetector for SeasonalAnalyzer {
    fn analyze(&self, data: &[f64], period: usize) -> SeasonalityProfile {
        self.analyze_with_decomposition(data, period).0
    }
}

/// Share of de-trended variance carried by the seasonal component.
///
/// Returns `0.0` when the de-trended series has negligible variance
/// relative to the data scale.
pub fn seasonal_strength(data: &[f64], decomposition: &DecompositionResult) -> f64 {
    let detrended: Vec<f64> = data
        .iter()
        .zip(&decomposition.trend)
        .map(|(d, t)| d - t)
        .collect();
    let var_detrended = variance(&detrended);

    let m = mean(data);
    let scale = (m * m + variance(data)).max(f64::MIN_POSITIVE);
    if var_detrended <= 1e-12 * scale {
        return 0.0;
    }

    (variance(&decomposition.seasonal) / var_detrended).clamp(0.0, 1.0)
}
