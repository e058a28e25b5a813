//! Linear trend model

use serde::{Deserialize, Serialize};

/// Fitted line `value = intercept + slope * index`, where `index` is the
/// zero-based position in the full historical series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendFit {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Horizontal line through `level`.
    pub fn flat(level: f64) -> Self {
        Self::new(0.0, level)
    }

    pub fn value_at(&self, index: f64) -> f64 {
        self.intercept + self.slope * index
    }
}
