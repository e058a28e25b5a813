//! Trait for confidence interval computation

use crate::model::ConfidenceBounds;

/// Derives forecast bounds from in-sample residuals.
pub trait ConfidenceIntervalComputer: Send + Sync {
    /// Bounds for `forecast` given the residuals of the fit that produced it.
    fn compute(&self, forecast: &[f64], residuals: &[f64]) -> ConfidenceBounds;
}
