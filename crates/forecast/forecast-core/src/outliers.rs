//! Robust outlier filtering.

use crate::stats::median;
use forecast_api::{ForecastConfig, DEFAULT_OUTLIER_THRESHOLD};
use forecast_spi::{OutlierFilter, OutlierReport};

// ============================================================================
// MAD Detector
// ============================================================================

/// Median absolute deviation filter.
///
/// An observation is an outlier when `|x - median| > k * MAD`. Flagged
/// values are pulled back to `median ± k * MAD` so the cleaned series keeps
/// its length and period alignment. A zero MAD disables flagging.
#[derive(Debug, Clone)]
pub struct MadDetector {
    threshold: f64,
}

impl MadDetector {
    /// Create a detector with MAD multiplier `k`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Create from configuration.
    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.outlier_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for MadDetector {
    fn default() -> Self {
        Self::new(DEFAULT_OUTLIER_THRESHOLD)
    }
}

impl OutlierFilter for MadDetector {
    fn filter(&self, data: &[f64]) -> OutlierReport {
        if data.is_empty() {
            return OutlierReport::untouched(data, 0.0, 0.0, self.threshold);
        }

        let center = median(data);
        let deviations: Vec<f64> = data.iter().map(|x| (x - center).abs()).collect();
        let mad = median(&deviations);

        if mad == 0.0 {
            return OutlierReport::untouched(data, center, mad, self.threshold);
        }

        let limit = self.threshold * mad;
        let mut cleaned = Vec::with_capacity(data.len());
        let mut is_outlier = Vec::with_capacity(data.len());
        for (&x, &dev) in data.iter().zip(&deviations) {
            if dev > limit {
                cleaned.push(if x > center { center + limit } else { center - limit });
                is_outlier.push(true);
            } else {
                cleaned.push(x);
                is_outlier.push(false);
            }
        }

        OutlierReport {
            cleaned,
            is_outlier,
            median: center,
            mad,
            threshold: self.threshold,
        }
    }
}
