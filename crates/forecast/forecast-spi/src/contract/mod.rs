//! Contract module containing trait definitions for forecast components

mod confidence_interval_computer;
mod decomposer;
mod outlier_filter;
mod seasonality_detector;
mod trend_estimator;

pub use confidence_interval_computer::ConfidenceIntervalComputer;
pub use decomposer::Decomposer;
pub use outlier_filter::OutlierFilter;
pub use seasonality_detector::SeasonalityDetector;
pub use trend_estimator::TrendEstimator;
