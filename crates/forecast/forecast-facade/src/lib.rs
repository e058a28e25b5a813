//! Forecast Facade
//!
//! High-level API for monthly metric forecasting. Re-exports all public
//! types from the forecast stack for convenient usage.
//!
//! ```rust,ignore
//! use forecast_facade::prelude::*;
//!
//! let series = HistoricalSeries::from_values("2023-01".parse()?, &values)?;
//! let result = Forecaster::new().forecast(&series, 12)?;
//! println!("{} -> {:?}", result.method, result.forecasted);
//! ```

// Re-export everything from API (which includes the SPI model)
pub use forecast_api::*;

// Re-export core modules for direct access
pub use forecast_core::{
    batch, confidence, decomposition, diagnostics, engine, outliers, seasonality, selection,
    stats, strategy, trend,
};

// Re-export engine types at root
pub use forecast_core::{
    AdditiveDecomposer, Diagnostics, ForecastJob, ForecastWithConfidence, Forecaster,
    LinearTrendEstimator, MadDetector, ResidualBandComputer, SeasonalAnalyzer, StrategyFit,
};

// Re-export SPI traits and models
pub use forecast_spi::{
    ConfidenceIntervalComputer, DecompositionResult, Decomposer, OutlierFilter, OutlierReport,
    SeasonalityDetector, TrendEstimator, TrendFit,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use forecast_api::prelude::*;
    pub use forecast_core::{ForecastJob, Forecaster};
}
