//! Forecast Service Provider Interface
//!
//! Defines the data model, error types and the traits implemented by the
//! outlier filter, seasonality analyzer, decomposer, trend estimator and
//! confidence interval computer.

pub mod contract;
pub mod error;
pub mod model;

/// Longest forecast horizon accepted, in months.
pub const MAX_HORIZON: usize = 1200;

// Re-export all public items at crate root for convenience
pub use contract::{
    ConfidenceIntervalComputer, Decomposer, OutlierFilter, SeasonalityDetector, TrendEstimator,
};
pub use error::{ForecastError, Result};
pub use model::{
    ConfidenceBounds, DecompositionResult, ForecastMetadata, ForecastResult,
    HistoricalSeries, ModelKind, MonthlySeriesPoint, OutlierReport, PeriodKey, SeasonalityProfile,
    TrendFit,
};
