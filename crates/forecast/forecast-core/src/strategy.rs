//! Forecasting strategies.
//!
//! Each strategy produces in-sample fitted values (one per observation) and
//! point forecasts (one per horizon step). Trend extrapolation is damped:
//! step `t` adds `slope * (1 + φ + ... + φ^(t-1))` to the last level, so the
//! first step is undamped and later increments shrink geometrically.

use crate::stats::mean;
use forecast_spi::{ForecastError, Result, TrendFit};

/// Lower bound of the level smoothing constant α.
pub const ALPHA_MIN: f64 = 0.1;
/// Upper bound of the level smoothing constant α.
pub const ALPHA_MAX: f64 = 0.8;
/// Trend smoothing constant as a fraction of α.
pub const TREND_SMOOTHING_RATIO: f64 = 0.5;
/// Sensitivity of α to volatility.
const VOLATILITY_SENSITIVITY: f64 = 5.0;

/// In-sample fit and point forecast of one strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyFit {
    pub fitted: Vec<f64>,
    pub forecast: Vec<f64>,
}

impl StrategyFit {
    fn checked(self) -> Result<Self> {
        if self.fitted.iter().chain(&self.forecast).all(|v| v.is_finite()) {
            Ok(self)
        } else {
            Err(ForecastError::NumericalInstability(
                "strategy produced non-finite values".to_string(),
            ))
        }
    }
}

/// Cumulative trend contribution after `steps` damped steps.
pub fn damped_offset(slope: f64, steps: usize, damping: f64) -> f64 {
    let mut factor = 1.0;
    let mut total = 0.0;
    for _ in 0..steps {
        total += factor;
        factor *= damping;
    }
    slope * total
}

/// Level smoothing constant for a series with the given volatility.
///
/// Calm series get a large α (react quickly), noisy series a small one.
pub fn smoothing_constant(volatility: f64) -> f64 {
    if !volatility.is_finite() {
        return ALPHA_MIN;
    }
    (ALPHA_MAX / (1.0 + VOLATILITY_SENSITIVITY * volatility.max(0.0))).clamp(ALPHA_MIN, ALPHA_MAX)
}

/// Straight-line extrapolation of `trend`.
pub fn fit_linear(trend: &TrendFit, n: usize, horizon: usize) -> Result<StrategyFit> {
    StrategyFit {
        fitted: (0..n).map(|i| trend.value_at(i as f64)).collect(),
        forecast: (1..=horizon)
            .map(|t| trend.value_at((n - 1 + t) as f64))
            .collect(),
    }
    .checked()
}

/// Damped trend plus additive seasonal indices.
///
/// `seasonal_indices[i % period]` is the seasonal offset of observation `i`.
pub fn fit_seasonal(
    trend: &TrendFit,
    seasonal_indices: &[f64],
    n: usize,
    horizon: usize,
    damping: f64,
) -> Result<StrategyFit> {
    let period = seasonal_indices.len();
    if period == 0 || n == 0 {
        return Err(ForecastError::NumericalInstability(
            "seasonal fit without seasonal indices".to_string(),
        ));
    }

    let fitted = (0..n)
        .map(|i| trend.value_at(i as f64) + seasonal_indices[i % period])
        .collect();

    let last_level = trend.value_at((n - 1) as f64);
    let forecast = (1..=horizon)
        .map(|t| {
            last_level
                + damped_offset(trend.slope, t, damping)
                + seasonal_indices[(n - 1 + t) % period]
        })
        .collect();

    StrategyFit { fitted, forecast }.checked()
}

/// Holt linear smoothing with a damped forecast.
///
/// The level starts at the first observation and the trend at
/// `initial_slope`; both are updated in error-correction form with
/// trend smoothing `α * TREND_SMOOTHING_RATIO`.
pub fn fit_smoothing(
    data: &[f64],
    initial_slope: f64,
    alpha: f64,
    horizon: usize,
    damping: f64,
) -> Result<StrategyFit> {
    let Some(&first) = data.first() else {
        return Err(ForecastError::NumericalInstability(
            "smoothing an empty series".to_string(),
        ));
    };

    let beta = alpha * TREND_SMOOTHING_RATIO;
    let mut level = first;
    let mut slope = initial_slope;
    let mut fitted = Vec::with_capacity(data.len());
    fitted.push(first);

    for &x in &data[1..] {
        let prediction = level + slope;
        fitted.push(prediction);
        let error = x - prediction;
        level = prediction + alpha * error;
        slope += beta * error;
    }

    let forecast = (1..=horizon)
        .map(|t| level + damped_offset(slope, t, damping))
        .collect();

    StrategyFit { fitted, forecast }.checked()
}

/// Flat mean forecast used when the selected strategy is degenerate.
pub fn flat_fallback(data: &[f64], horizon: usize) -> StrategyFit {
    let level = mean(data);
    StrategyFit {
        fitted: vec![level; data.len()],
        forecast: vec![level; horizon],
    }
}
