//! Trait for seasonality detection

use crate::model::SeasonalityProfile;

/// Measures how strongly a series repeats with a given period.
pub trait SeasonalityDetector: Send + Sync {
    /// Analyze `data` for a repeating pattern of length `period`.
    fn analyze(&self, data: &[f64], period: usize) -> SeasonalityProfile;
}
