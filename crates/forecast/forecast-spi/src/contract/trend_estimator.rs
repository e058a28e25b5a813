//! Trait for trend estimation

use crate::error::Result;
use crate::model::TrendFit;

/// Fits a linear trend indexed by position in the full series.
pub trait TrendEstimator: Send + Sync {
    /// Fails with [`ForecastError::NumericalInstability`] when the fit is
    /// degenerate (fewer than two points).
    ///
    /// [`ForecastError::NumericalInstability`]: crate::ForecastError::NumericalInstability
    fn estimate(&self, data: &[f64]) -> Result<TrendFit>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    /// Mock implementation: line through the first and last point
    struct EndpointEstimator;

    impl TrendEstimator for EndpointEstimator {
        fn estimate(&self, data: &[f64]) -> Result<TrendFit> {
            if data.len() < 2 {
                return Err(ForecastError::NumericalInstability(
                    "need two points".to_string(),
                ));
            }
            let last = data.len() - 1;
            let slope = (data[last] - data[0]) / last as f64;
            Ok(TrendFit::new(slope, data[0]))
        }
    }

    #[test]
    fn test_endpoint_estimator() {
        let fit = EndpointEstimator.estimate(&[2.0, 5.0, 8.0]).unwrap();
        assert_eq!(fit.slope, 3.0);
        assert_eq!(fit.value_at(3.0), 11.0);
    }

    #[test]
    fn test_degenerate_input_is_error() {
        let err = EndpointEstimator.estimate(&[1.0]).unwrap_err();
        assert!(!err.is_caller_error());
    }
}
