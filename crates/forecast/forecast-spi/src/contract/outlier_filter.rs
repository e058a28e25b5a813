//! Trait for robust outlier filtering

use crate::model::OutlierReport;

/// Flags outliers and produces a same-length cleaned series.
///
/// Implementations never drop observations: period alignment downstream
/// depends on the series keeping its length.
pub trait OutlierFilter: Send + Sync {
    fn filter(&self, data: &[f64]) -> OutlierReport;
}
