//! Parallel batch forecasting.

use crate::engine::Forecaster;
use forecast_spi::{ForecastResult, HistoricalSeries, Result};
use rayon::prelude::*;

/// One series and the horizon requested for it.
#[derive(Debug, Clone)]
pub struct ForecastJob {
    pub series: HistoricalSeries,
    pub horizon: i64,
}

impl ForecastJob {
    pub fn new(series: HistoricalSeries, horizon: i64) -> Self {
        Self { series, horizon }
    }
}

impl Forecaster {
    /// Forecast independent series in parallel.
    ///
    /// Results are returned in job order; a failing job does not affect
    /// the others.
    pub fn forecast_batch(&self, jobs: &[ForecastJob]) -> Vec<Result<ForecastResult>> {
        jobs.par_iter()
            .map(|job| self.forecast(&job.series, job.horizon))
            .collect()
    }
}
