//! Decomposition result model

/// Additive decomposition `Y = T + S + R` of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionResult {
    /// Trend component
    pub trend: Vec<f64>,
    /// Seasonal component, one value per observation
    pub seasonal: Vec<f64>,
    /// Residual component
    pub residual: Vec<f64>,
    /// One index per position within the period, centered on zero
    pub seasonal_indices: Vec<f64>,
}

impl DecompositionResult {
    /// Decomposition that attributes everything to the trend.
    pub fn trend_only(data: &[f64]) -> Self {
        Self {
            trend: data.to_vec(),
            seasonal: vec![0.0; data.len()],
            residual: vec![0.0; data.len()],
            seasonal_indices: Vec::new(),
        }
    }

    /// Series with the seasonal component removed.
    pub fn deseasonalized(&self) -> Vec<f64> {
        self.trend
            .iter()
            .zip(&self.residual)
            .map(|(t, r)| t + r)
            .collect()
    }
}
