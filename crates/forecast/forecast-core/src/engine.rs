//! Forecasting engine.
//!
//! Runs the full pipeline for one series: outlier dampening, seasonality
//! analysis, trend estimation, model selection, strategy fit, confidence
//! bounds and diagnostics.

use crate::confidence::ResidualBandComputer;
use crate::diagnostics::{volatility, Diagnostics};
use crate::outliers::MadDetector;
use crate::seasonality::SeasonalAnalyzer;
use crate::selection::select_model;
use crate::stats::std_dev;
use crate::strategy::{
    fit_linear, fit_seasonal, fit_smoothing, flat_fallback, smoothing_constant, StrategyFit,
};
use crate::trend::LinearTrendEstimator;
use forecast_api::{ForecastConfig, GapPolicy};
use forecast_spi::{
    ConfidenceIntervalComputer, DecompositionResult, ForecastError, ForecastResult,
    HistoricalSeries, ModelKind, OutlierFilter, Result, SeasonalityProfile, TrendEstimator,
    TrendFit, MAX_HORIZON,
};
use tracing::{debug, warn};

/// Monthly series forecaster.
///
/// Holds only configuration; every call to [`forecast`](Self::forecast) is
/// independent and deterministic, so one instance can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct Forecaster {
    config: ForecastConfig,
    outliers: MadDetector,
    seasonality: SeasonalAnalyzer,
    trend: LinearTrendEstimator,
    bands: ResidualBandComputer,
}

impl Forecaster {
    /// Create a forecaster with the default configuration.
    pub fn new() -> Self {
        Self::build(ForecastConfig::default())
    }

    /// Create a forecaster from a validated configuration.
    pub fn with_config(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ForecastConfig) -> Self {
        Self {
            outliers: MadDetector::from_config(&config),
            seasonality: SeasonalAnalyzer::from_config(&config),
            trend: LinearTrendEstimator::from_config(&config),
            bands: ResidualBandComputer::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast `horizon` months past the end of `series`.
    pub fn forecast(&self, series: &HistoricalSeries, horizon: i64) -> Result<ForecastResult> {
        let horizon = checked_horizon(horizon)?;

        let n = series.len();
        if n < self.config.min_history {
            return Err(ForecastError::InsufficientData {
                required: self.config.min_history,
                actual: n,
            });
        }

        let gaps = series.gap_count();
        if gaps > 0 {
            if self.config.gap_policy == GapPolicy::Reject {
                return Err(ForecastError::InvalidSeries(format!(
                    "{} missing month(s) in history",
                    gaps
                )));
            }
            warn!(gaps, "series has missing months; seasonal positions may drift");
        }

        let raw = series.values();
        let report = self.outliers.filter(&raw);
        let outliers_dampened = report.outlier_count();
        if outliers_dampened > 0 {
            debug!(
                count = outliers_dampened,
                median = report.median,
                mad = report.mad,
                "dampened outliers"
            );
        }
        let cleaned = report.cleaned;

        let (profile, decomposition) = self
            .seasonality
            .analyze_with_decomposition(&cleaned, self.config.period);
        debug!(
            detected = profile.detected,
            period = profile.period,
            strength = profile.strength,
            "seasonality analyzed"
        );

        let method = select_model(n, &profile);
        debug!(%method, history = n, horizon, "model selected");

        let (fit, trend_slope, fallback_applied) =
            match self.fit(method, &cleaned, &profile, &decomposition, horizon) {
                Ok((fit, trend)) => (fit, trend.slope, false),
                Err(err) => {
                    warn!(%method, error = %err, "falling back to flat mean forecast");
                    (flat_fallback(&cleaned, horizon), 0.0, true)
                }
            };

        let mut forecasted = fit.forecast;
        if self.config.non_negative {
            for value in forecasted.iter_mut() {
                *value = value.max(0.0);
            }
        }

        let residuals: Vec<f64> = cleaned
            .iter()
            .zip(&fit.fitted)
            .map(|(c, f)| c - f)
            .collect();

        // Bands only see the months the trend was fitted on
        let band_residuals = &residuals[self.trend.window_start(n)..];
        let confidence = if fallback_applied {
            self.bands.compute_constant(&forecasted, std_dev(band_residuals))
        } else {
            self.bands.compute(&forecasted, band_residuals)
        };

        let metadata = Diagnostics {
            raw: &raw,
            fitted: &fit.fitted,
            residuals: &residuals,
            trend_slope,
            seasonality: profile,
            horizon,
            outliers_dampened,
            gaps,
            fallback_applied,
        }
        .report();

        Ok(ForecastResult {
            method,
            forecasted,
            confidence,
            metadata,
            periods: series.future_periods(horizon),
        })
    }

    fn fit(
        &self,
        method: ModelKind,
        cleaned: &[f64],
        profile: &SeasonalityProfile,
        decomposition: &DecompositionResult,
        horizon: usize,
    ) -> Result<(StrategyFit, TrendFit)> {
        let trend = if profile.detected {
            self.trend.estimate(&decomposition.deseasonalized())?
        } else {
            self.trend.estimate(cleaned)?
        };
        let n = cleaned.len();
        let damping = self.config.damping;

        let fit = match method {
            ModelKind::LinearRegression => fit_linear(&trend, n, horizon)?,
            ModelKind::SeasonalDecomposition => {
                fit_seasonal(&trend, &decomposition.seasonal_indices, n, horizon, damping)?
            }
            ModelKind::ExponentialSmoothing => {
                let start = self.trend.window_start(n);
                let window = &cleaned[start..];
                let detrended: Vec<f64> = window
                    .iter()
                    .enumerate()
                    .map(|(j, c)| c - trend.value_at((start + j) as f64))
                    .collect();
                let alpha = smoothing_constant(volatility(&detrended, window));
                debug!(alpha, "smoothing constant");
                fit_smoothing(cleaned, trend.slope, alpha, horizon, damping)?
            }
        };
        Ok((fit, trend))
    }
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_horizon(horizon: i64) -> Result<usize> {
    match usize::try_from(horizon) {
        Ok(h) if (1..=MAX_HORIZON).contains(&h) => Ok(h),
        _ => Err(ForecastError::InvalidHorizon(horizon)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_spi::{MonthlySeriesPoint, PeriodKey};

    fn start() -> PeriodKey {
        PeriodKey::new(2021, 1).unwrap()
    }

    fn series(values: &[f64]) -> HistoricalSeries {
        HistoricalSeries::from_values(start(), values).unwrap()
    }

    #[test]
    fn test_horizon_checked_before_history() {
        let short = series(&[1.0, 2.0]);
        let forecaster = Forecaster::new();
        assert_eq!(
            forecaster.forecast(&short, 0),
            Err(ForecastError::InvalidHorizon(0))
        );
        assert_eq!(
            forecaster.forecast(&short, -4),
            Err(ForecastError::InvalidHorizon(-4))
        );
        assert_eq!(
            forecaster.forecast(&short, MAX_HORIZON as i64 + 1),
            Err(ForecastError::InvalidHorizon(MAX_HORIZON as i64 + 1))
        );
    }

    #[test]
    fn test_insufficient_history() {
        let result = Forecaster::new().forecast(&series(&[1.0, 2.0, 3.0]), 6);
        assert_eq!(
            result,
            Err(ForecastError::InsufficientData {
                required: 6,
                actual: 3
            })
        );
    }

    #[test]
    fn test_short_history_uses_linear_regression() {
        let values: Vec<f64> = (0..8).map(|i| 20.0 + 2.0 * i as f64).collect();
        let result = Forecaster::new().forecast(&series(&values), 3).unwrap();
        assert_eq!(result.method, ModelKind::LinearRegression);
        assert!((result.forecasted[0] - 36.0).abs() < 1e-9);
        assert!((result.forecasted[2] - 40.0).abs() < 1e-9);
        assert!(result.metadata.r2.unwrap() > 0.999_999);
    }

    #[test]
    fn test_linear_forecast_clamped_at_zero() {
        let values: Vec<f64> = (0..8).map(|i| 70.0 - 10.0 * i as f64).collect();
        let result = Forecaster::new().forecast(&series(&values), 4).unwrap();
        assert_eq!(result.forecasted, vec![0.0; 4]);
        assert!(result.confidence.lower.iter().all(|&l| l == 0.0));
    }

    #[test]
    fn test_signed_domain_keeps_negative_forecast() {
        let values: Vec<f64> = (0..8).map(|i| 70.0 - 10.0 * i as f64).collect();
        let forecaster =
            Forecaster::with_config(ForecastConfig::new().with_non_negative(false)).unwrap();
        let result = forecaster.forecast(&series(&values), 2).unwrap();
        assert!((result.forecasted[0] + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_series() {
        let result = Forecaster::new().forecast(&series(&[100.0; 12]), 6).unwrap();
        assert_eq!(result.method, ModelKind::ExponentialSmoothing);
        for i in 0..6 {
            assert!((result.forecasted[i] - 100.0).abs() < 1e-9);
            assert!(result.band_widths()[i].abs() < 1e-9);
        }
        assert_eq!(result.metadata.r2, None);
        assert_eq!(result.metadata.volatility, 0.0);
    }

    #[test]
    fn test_periods_follow_history() {
        let result = Forecaster::new().forecast(&series(&[5.0; 12]), 2).unwrap();
        let rendered: Vec<String> = result.periods.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["2022-01", "2022-02"]);
    }

    #[test]
    fn test_gap_policy() {
        // July 2022 missing
        let points: Vec<MonthlySeriesPoint> = [1, 2, 3, 4, 5, 6, 8, 9, 10, 11, 12]
            .iter()
            .map(|&m| MonthlySeriesPoint::new(PeriodKey::new(2022, m).unwrap(), 10.0 + m as f64))
            .collect();
        let gappy = HistoricalSeries::new(points).unwrap();

        let tolerated = Forecaster::new().forecast(&gappy, 3).unwrap();
        assert_eq!(tolerated.metadata.gaps, 1);
        assert_eq!(tolerated.forecasted.len(), 3);

        let strict =
            Forecaster::with_config(ForecastConfig::new().with_gap_policy(GapPolicy::Reject))
                .unwrap();
        assert!(matches!(
            strict.forecast(&gappy, 3),
            Err(ForecastError::InvalidSeries(_))
        ));
    }

    #[test]
    fn test_with_config_validates() {
        let result = Forecaster::with_config(ForecastConfig::new().with_damping(0.0));
        assert!(matches!(
            result,
            Err(ForecastError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_outliers_counted_in_metadata() {
        let mut values: Vec<f64> = (0..12).map(|i| 50.0 + (i % 3) as f64).collect();
        values[7] = 500.0;
        let result = Forecaster::new().forecast(&series(&values), 3).unwrap();
        assert_eq!(result.metadata.outliers_dampened, 1);
        assert!(result.forecasted.iter().all(|&f| f < 100.0));
    }

    #[test]
    fn test_deterministic() {
        let values: Vec<f64> = (0..30).map(|i| 10.0 + (i as f64 * 0.7).sin() * 3.0).collect();
        let forecaster = Forecaster::new();
        let a = forecaster.forecast(&series(&values), 12).unwrap();
        let b = forecaster.forecast(&series(&values), 12).unwrap();
        assert_eq!(a, b);
    }

    fn assert_finite_and_ordered(result: &ForecastResult) {
        for i in 0..result.horizon() {
            let (lower, f, upper) = (
                result.confidence.lower[i],
                result.forecasted[i],
                result.confidence.upper[i],
            );
            assert!(lower.is_finite() && f.is_finite() && upper.is_finite());
            assert!(lower <= f && f <= upper);
        }
        assert!(result.metadata.historical_mean.is_finite());
        assert!(result.metadata.volatility.is_finite());
    }

    #[test]
    fn test_fallback_for_overflowing_history() {
        let values: Vec<f64> = (0..6)
            .map(|i| if i % 2 == 0 { 1.7e308 } else { -1.7e308 })
            .collect();
        for non_negative in [true, false] {
            let forecaster =
                Forecaster::with_config(ForecastConfig::new().with_non_negative(non_negative))
                    .unwrap();
            let result = forecaster.forecast(&series(&values), 2).unwrap();
            assert!(result.metadata.fallback_applied);
            assert_eq!(result.method, ModelKind::LinearRegression);
            assert_eq!(result.metadata.trend_slope, 0.0);
            assert_eq!(result.forecasted, vec![0.0, 0.0]);
            assert_finite_and_ordered(&result);
        }
    }

    #[test]
    fn test_history_near_float_max_stays_finite() {
        for non_negative in [true, false] {
            let forecaster =
                Forecaster::with_config(ForecastConfig::new().with_non_negative(non_negative))
                    .unwrap();
            let result = forecaster.forecast(&series(&[1.0e308; 6]), 2).unwrap();
            assert_finite_and_ordered(&result);
            assert!((result.forecasted[0] / 1.0e308 - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_smoothing_uses_trend_window_after_regime_change() {
        // Three noisy flat years, then three years rising 2 per month
        let values: Vec<f64> = (0..72)
            .map(|i| {
                if i < 36 {
                    100.0 + if i % 2 == 0 { -15.0 } else { 15.0 }
                } else {
                    100.0 + 2.0 * (i - 35) as f64
                }
            })
            .collect();
        let result = Forecaster::new().forecast(&series(&values), 3).unwrap();

        assert_eq!(result.method, ModelKind::ExponentialSmoothing);
        assert_eq!(result.metadata.outliers_dampened, 0);
        // Calm recent window keeps α at its ceiling, so the level tracks the ramp
        assert!((result.forecasted[0] - 174.0).abs() < 1e-6);
        assert!((result.forecasted[1] - 175.9).abs() < 1e-6);
        // Old-regime noise stays out of the bands
        assert!(result.band_widths()[0] < 10.0);
        assert_finite_and_ordered(&result);
    }
}
