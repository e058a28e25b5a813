//! Historical monthly series

use super::PeriodKey;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// One monthly observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySeriesPoint {
    #[serde(alias = "date")]
    pub period_key: PeriodKey,
    pub value: f64,
}

impl MonthlySeriesPoint {
    pub fn new(period_key: PeriodKey, value: f64) -> Self {
        Self { period_key, value }
    }
}

/// Chronologically ordered monthly observations.
///
/// Period keys are unique and strictly increasing and every value is
/// finite; both are checked on construction and on deserialization.
/// Missing months are allowed here and reported by [`gap_count`].
///
/// [`gap_count`]: HistoricalSeries::gap_count
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<MonthlySeriesPoint>",
    into = "Vec<MonthlySeriesPoint>"
)]
pub struct HistoricalSeries {
    points: Vec<MonthlySeriesPoint>,
}

impl HistoricalSeries {
    pub fn new(points: Vec<MonthlySeriesPoint>) -> Result<Self> {
        if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(ForecastError::InvalidSeries(format!(
                "non-finite value at {}",
                bad.period_key
            )));
        }

        for pair in points.windows(2) {
            let (prev, next) = (pair[0].period_key, pair[1].period_key);
            if next == prev {
                return Err(ForecastError::InvalidSeries(format!(
                    "duplicate period {}",
                    next
                )));
            }
            if next < prev {
                return Err(ForecastError::InvalidSeries(format!(
                    "period {} follows {}; keys must be strictly increasing",
                    next, prev
                )));
            }
        }

        Ok(Self { points })
    }

    /// Build a contiguous series starting at `start`.
    pub fn from_values(start: PeriodKey, values: &[f64]) -> Result<Self> {
        let mut key = start;
        let mut points = Vec::with_capacity(values.len());
        for &value in values {
            points.push(MonthlySeriesPoint::new(key, value));
            key = key.next();
        }
        Self::new(points)
    }

    pub fn points(&self) -> &[MonthlySeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn first_period(&self) -> Option<PeriodKey> {
        self.points.first().map(|p| p.period_key)
    }

    pub fn last_period(&self) -> Option<PeriodKey> {
        self.points.last().map(|p| p.period_key)
    }

    /// Total number of calendar months missing between observations.
    pub fn gap_count(&self) -> usize {
        self.points
            .windows(2)
            .map(|w| (w[0].period_key.months_until(&w[1].period_key) - 1) as usize)
            .sum()
    }

    /// Period keys of the `horizon` months following the last observation.
    pub fn future_periods(&self, horizon: usize) -> Vec<PeriodKey> {
        let Some(mut key) = self.last_period() else {
            return Vec::new();
        };
        (0..horizon)
            .map(|_| {
                key = key.next();
                key
            })
            .collect()
    }
}

impl TryFrom<Vec<MonthlySeriesPoint>> for HistoricalSeries {
    type Error = ForecastError;

    fn try_from(points: Vec<MonthlySeriesPoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<HistoricalSeries> for Vec<MonthlySeriesPoint> {
    fn from(series: HistoricalSeries) -> Self {
        series.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> PeriodKey {
        raw.parse().unwrap()
    }

    #[test]
    fn test_from_values_is_contiguous() {
        let series = HistoricalSeries::from_values(key("2023-11"), &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first_period(), Some(key("2023-11")));
        assert_eq!(series.last_period(), Some(key("2024-01")));
        assert_eq!(series.gap_count(), 0);
        assert_eq!(series.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_rejects_duplicate_period() {
        let points = vec![
            MonthlySeriesPoint::new(key("2024-01"), 1.0),
            MonthlySeriesPoint::new(key("2024-01"), 2.0),
        ];
        let err = HistoricalSeries::new(points).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidSeries(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_rejects_out_of_order() {
        let points = vec![
            MonthlySeriesPoint::new(key("2024-02"), 1.0),
            MonthlySeriesPoint::new(key("2024-01"), 2.0),
        ];
        assert!(HistoricalSeries::new(points).is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let points = vec![
            MonthlySeriesPoint::new(key("2024-01"), 1.0),
            MonthlySeriesPoint::new(key("2024-02"), f64::NAN),
        ];
        assert!(HistoricalSeries::new(points).is_err());
    }

    #[test]
    fn test_zero_values_are_valid() {
        let series = HistoricalSeries::from_values(key("2024-01"), &[0.0, 0.0, 5.0]).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_gap_count() {
        let points = vec![
            MonthlySeriesPoint::new(key("2024-01"), 1.0),
            MonthlySeriesPoint::new(key("2024-04"), 2.0),
            MonthlySeriesPoint::new(key("2024-05"), 3.0),
            MonthlySeriesPoint::new(key("2024-07"), 4.0),
        ];
        let series = HistoricalSeries::new(points).unwrap();
        assert_eq!(series.gap_count(), 3);
    }

    #[test]
    fn test_future_periods() {
        let series = HistoricalSeries::from_values(key("2024-10"), &[1.0, 2.0]).unwrap();
        let periods = series.future_periods(3);
        let rendered: Vec<String> = periods.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["2024-12", "2025-01", "2025-02"]);
        assert!(HistoricalSeries::default().future_periods(3).is_empty());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: HistoricalSeries = serde_json::from_str(
            r#"[{"periodKey":"2024-01","value":1.5},{"date":"2024-02-01","value":2.0}]"#,
        )
        .unwrap();
        assert_eq!(ok.len(), 2);

        let dup = serde_json::from_str::<HistoricalSeries>(
            r#"[{"periodKey":"2024-01","value":1.5},{"periodKey":"2024-01","value":2.0}]"#,
        );
        assert!(dup.is_err());
    }

    #[test]
    fn test_serialize_as_point_array() {
        let series = HistoricalSeries::from_values(key("2024-01"), &[3.0]).unwrap();
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"[{"periodKey":"2024-01","value":3.0}]"#);
    }
}
