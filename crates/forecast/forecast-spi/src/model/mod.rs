//! Model module containing data structures

mod decomposition_result;
mod forecast_result;
mod historical_series;
mod outlier_report;
mod period_key;
mod trend_fit;

pub use decomposition_result::DecompositionResult;
pub use forecast_result::{
    ConfidenceBounds, ForecastMetadata, ForecastResult, ModelKind, SeasonalityProfile,
};
pub use historical_series::{HistoricalSeries, MonthlySeriesPoint};
pub use outlier_report::OutlierReport;
pub use period_key::PeriodKey;
pub use trend_fit::TrendFit;
