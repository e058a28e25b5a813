//! Forecast Core
//!
//! Core implementations of the monthly forecasting pipeline: robust outlier
//! filtering, additive decomposition and seasonality analysis, trend
//! estimation, model selection, forecasting strategies, confidence bounds
//! and diagnostics.

pub mod batch;
pub mod confidence;
pub mod decomposition;
pub mod diagnostics;
pub mod engine;
pub mod outliers;
pub mod seasonality;
pub mod selection;
pub mod stats;
pub mod strategy;
pub mod trend;

// Re-export SPI traits for implementations
pub use forecast_spi::{
    ConfidenceIntervalComputer, Decomposer, DecompositionResult, ForecastError, OutlierFilter,
    OutlierReport, Result, SeasonalityDetector, TrendEstimator, TrendFit,
};

// Re-export main types
pub use batch::ForecastJob;
pub use confidence::{z_score, ForecastWithConfidence, ResidualBandComputer};
pub use decomposition::AdditiveDecomposer;
pub use diagnostics::Diagnostics;
pub use engine::Forecaster;
pub use outliers::MadDetector;
pub use seasonality::SeasonalAnalyzer;
pub use selection::select_model;
pub use strategy::StrategyFit;
pub use trend::LinearTrendEstimator;
