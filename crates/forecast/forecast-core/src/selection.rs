//! Model selection rules.

use forecast_api::{SEASONAL_MIN_HISTORY, SMOOTHING_MIN_HISTORY};
use forecast_spi::{ModelKind, SeasonalityProfile};

/// Pick the forecasting strategy for a history of `history_len` points.
pub fn select_model(history_len: usize, seasonality: &SeasonalityProfile) -> ModelKind {
    match history_len {
        n if n < SMOOTHING_MIN_HISTORY => ModelKind::LinearRegression,
        n if n >= SEASONAL_MIN_HISTORY && seasonality.detected => ModelKind::SeasonalDecomposition,
        n if n >= SMOOTHING_MIN_HISTORY => ModelKind::ExponentialSmoothing,
        _ => ModelKind::LinearRegression,
    }
}
