//! Golden fixtures for the tunable constants
//!
//! Pins the outlier multiplier, seasonality threshold and damping factor to
//! hand-computed values so that changing a default is a visible decision.

use forecast_facade::prelude::*;
use forecast_facade::{
    strategy::damped_offset, MadDetector, OutlierFilter, SeasonalAnalyzer, SeasonalityDetector,
    DEFAULT_DAMPING, DEFAULT_OUTLIER_THRESHOLD, DEFAULT_SEASONALITY_THRESHOLD,
};

#[test]
fn golden_default_constants() {
    assert_eq!(DEFAULT_OUTLIER_THRESHOLD, 3.5);
    assert_eq!(DEFAULT_SEASONALITY_THRESHOLD, 0.3);
    assert_eq!(DEFAULT_DAMPING, 0.95);
}

#[test]
fn golden_mad_dampening() {
    // median 12, MAD 1, ceiling 12 + 3.5 * 1
    let report = MadDetector::default().filter(&[10.0, 11.0, 12.0, 13.0, 100.0]);
    assert_eq!(report.cleaned, vec![10.0, 11.0, 12.0, 13.0, 15.5]);
}

#[test]
fn golden_mad_boundary_not_flagged() {
    // |x - median| equal to k * MAD stays untouched
    let report = MadDetector::default().filter(&[10.0, 11.0, 12.0, 13.0, 15.5]);
    assert_eq!(report.outlier_count(), 0);
}

#[test]
fn golden_seasonality_threshold() {
    // Square wave on a 12-month cycle: strength well above 0.3
    let strong: Vec<f64> = (0..24).map(|t| if t % 12 < 6 { 10.0 } else { 30.0 }).collect();
    assert!(SeasonalAnalyzer::default().analyze(&strong, 12).detected);

    // Same data against a threshold no real series reaches
    let strict = SeasonalAnalyzer::new(0.999_999);
    assert!(!strict.analyze(&strong, 12).detected);
}

#[test]
fn golden_damped_offsets() {
    assert!((damped_offset(1.0, 1, DEFAULT_DAMPING) - 1.0).abs() < 1e-12);
    assert!((damped_offset(1.0, 2, DEFAULT_DAMPING) - 1.95).abs() < 1e-12);
    assert!((damped_offset(1.0, 3, DEFAULT_DAMPING) - 2.8525).abs() < 1e-12);
}

#[test]
fn golden_damped_smoothing_forecast() {
    let values: Vec<f64> = (0..24).map(|t| 100.0 + 10.0 * t as f64).collect();
    let series = HistoricalSeries::from_values("2020-01".parse().unwrap(), &values).unwrap();
    let result = Forecaster::new().forecast(&series, 24).unwrap();

    assert_eq!(result.method, ModelKind::ExponentialSmoothing);
    assert!((result.forecasted[0] - 340.0).abs() < 1e-6);
    assert!((result.forecasted[1] - 349.5).abs() < 1e-6);
    // 330 + 10 * (1 - 0.95^24) / 0.05
    assert!((result.forecasted[23] - 471.602195).abs() < 1e-5);
}
