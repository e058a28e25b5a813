//! Time series decomposition implementations
//!
//! Additive decomposition `Y = T + S + R` around a provisional linear trend.
//! Additive indices stay well defined when the series contains zeros.

use crate::stats::{mean, ols};
use forecast_spi::{DecompositionResult, Decomposer};

/// Additive decomposition: Y = T + S + R
#[derive(Debug, Clone, Copy, Default)]
pub struct AdditiveDecomposer;

impl AdditiveDecomposer {
    pub fn new() -> Self {
        Self
    }
}

impl Decomposer for AdditiveDecomposer {
    fn decompose(&self, data: &[f64], period: usize) -> DecompositionResult {
        decompose_additive(data, period)
    }
}

/// Perform additive decomposition.
///
/// Needs at least two full cycles; shorter input is returned as trend only.
pub fn decompose_additive(data: &[f64], period: usize) -> DecompositionResult {
    let n = data.len();
    if period < 2 || n < period * 2 {
        return DecompositionResult::trend_only(data);
    }

    let Ok(line) = ols(data, 0) else {
        return DecompositionResult::trend_only(data);
    };
    let trend: Vec<f64> = (0..n).map(|i| line.value_at(i as f64)).collect();

    // Detrend
    let detrended: Vec<f64> = data.iter().zip(&trend).map(|(d, t)| d - t).collect();

    // Average by position within the period, then center on zero
    let mut seasonal_indices: Vec<f64> = (0..period)
        .map(|pos| {
            let values: Vec<f64> = detrended.iter().skip(pos).step_by(period).copied().collect();
            mean(&values)
        })
        .collect();
    let offset = mean(&seasonal_indices);
    for idx in seasonal_indices.iter_mut() {
        *idx -= offset;
    }

    let seasonal: Vec<f64> = (0..n).map(|i| seasonal_indices[i % period]).collect();
    let residual: Vec<f64> = detrended
        .iter()
        .zip(&seasonal)
        .map(|(d, s)| d - s)
        .collect();

    DecompositionResult {
        trend,
        seasonal,
        residual,
        seasonal_indices,
    }
}
