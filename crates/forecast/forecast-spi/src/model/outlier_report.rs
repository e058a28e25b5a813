//! Outlier detection result

use serde::{Deserialize, Serialize};

/// Result of the robust outlier pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Same-length series with outliers pulled back to the threshold.
    pub cleaned: Vec<f64>,
    /// Mask of flagged observations.
    pub is_outlier: Vec<bool>,
    pub median: f64,
    /// Median absolute deviation around `median`.
    pub mad: f64,
    /// MAD multiplier used for flagging.
    pub threshold: f64,
}

impl OutlierReport {
    /// Report that leaves `data` untouched.
    pub fn untouched(data: &[f64], median: f64, mad: f64, threshold: f64) -> Self {
        Self {
            cleaned: data.to_vec(),
            is_outlier: vec![false; data.len()],
            median,
            mad,
            threshold,
        }
    }

    pub fn outlier_indices(&self) -> Vec<usize> {
        self.is_outlier
            .iter()
            .enumerate()
            .filter_map(|(i, &flagged)| if flagged { Some(i) } else { None })
            .collect()
    }

    pub fn outlier_count(&self) -> usize {
        self.is_outlier.iter().filter(|&&x| x).count()
    }
}
