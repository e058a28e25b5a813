//! Trait for time series decomposition

use crate::model::DecompositionResult;

/// Splits a series into trend, seasonal and residual components.
pub trait Decomposer: Send + Sync {
    fn decompose(&self, data: &[f64], period: usize) -> DecompositionResult;
}
