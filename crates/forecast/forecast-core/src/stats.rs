//! Descriptive statistics and least squares
//!
//! Empty inputs yield `0.0` (or `NaN` for the median) rather than panicking.

use forecast_spi::{ForecastError, Result, TrendFit};

/// Arithmetic mean. Sums that overflow are retried on pre-scaled terms, so
/// the mean of finite values is always finite.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let n = data.len() as f64;
    let m = data.iter().sum::<f64>() / n;
    if m.is_finite() {
        m
    } else {
        data.iter().map(|x| x / n).sum()
    }
}

/// Population variance.
pub fn variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64
}

fn sample_variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Square root of `spread(data)`, recomputed on data scaled by its largest
/// magnitude when the squares overflow.
fn rescaled_sqrt(data: &[f64], spread: fn(&[f64]) -> f64) -> f64 {
    let sigma = spread(data).sqrt();
    if sigma.is_finite() {
        return sigma;
    }
    let scale = data.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return sigma;
    }
    let scaled: Vec<f64> = data.iter().map(|x| x / scale).collect();
    scale * spread(&scaled).sqrt()
}

/// Population standard deviation.
pub fn std_dev(data: &[f64]) -> f64 {
    rescaled_sqrt(data, variance)
}

/// Sample (n - 1) standard deviation.
pub fn sample_std_dev(data: &[f64]) -> f64 {
    rescaled_sqrt(data, sample_variance)
}

pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Ordinary least squares of `data[j]` against the index `offset + j`.
///
/// Fails with `NumericalInstability` for fewer than two points or a
/// non-finite solution.
pub fn ols(data: &[f64], offset: usize) -> Result<TrendFit> {
    let n = data.len();
    if n < 2 {
        return Err(ForecastError::NumericalInstability(format!(
            "linear fit needs at least 2 points, got {}",
            n
        )));
    }

    let mean_x = offset as f64 + (n - 1) as f64 / 2.0;
    let mean_y = mean(data);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (j, &y) in data.iter().enumerate() {
        let dx = (offset + j) as f64 - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(ForecastError::NumericalInstability(
            "singular regression".to_string(),
        ));
    }
    Ok(TrendFit::new(slope, intercept))
}
