//! API route handlers

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use forecast_facade::{
    ForecastError, ForecastJob, ForecastResult, HistoricalSeries, MonthlySeriesPoint,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Largest number of series accepted by one `/predict/batch` call.
pub const MAX_BATCH_SIZE: usize = 256;

/// Metric family of the submitted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Energy,
    Water,
    Waste,
    Emissions,
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub domain: Domain,
    pub organization_id: String,
    pub historical_data: Vec<MonthlySeriesPoint>,
    pub months_to_forecast: i64,
}

impl PredictRequest {
    fn into_job(self) -> Result<(RequestTag, ForecastJob), ForecastError> {
        let series = HistoricalSeries::new(self.historical_data)?;
        let tag = RequestTag {
            domain: self.domain,
            organization_id: self.organization_id,
        };
        Ok((tag, ForecastJob::new(series, self.months_to_forecast)))
    }
}

/// Request fields echoed back with the forecast.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestTag {
    domain: Domain,
    organization_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub domain: Domain,
    pub organization_id: String,
    #[serde(flatten)]
    pub forecast: ForecastResult,
}

impl PredictResponse {
    fn new(tag: RequestTag, forecast: ForecastResult) -> Self {
        Self {
            domain: tag.domain,
            organization_id: tag.organization_id,
            forecast,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub requests: Vec<PredictRequest>,
}

/// One entry of a batch response: a forecast or the error it failed with.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Forecast(PredictResponse),
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchItem>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request failure rendered as an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    Forecast(ForecastError),
    BatchTooLarge { max: usize, actual: usize },
    Internal(String),
}

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        Self::Forecast(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Forecast(err) if err.is_caller_error() => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Forecast(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Self::BatchTooLarge { max, actual } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("batch of {} requests exceeds the limit of {}", actual, max),
            ),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        tracing::warn!(%status, %error, "forecast request failed");
        (status, Json(ErrorResponse { error })).into_response()
    }
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "forecast-server",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "engine": "forecast-core",
        "version": env!("CARGO_PKG_VERSION"),
        "config": state.forecaster.config()
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let (tag, job) = req.into_job()?;
    tracing::info!(
        domain = ?tag.domain,
        organization = %tag.organization_id,
        points = job.series.len(),
        horizon = job.horizon,
        "forecast requested"
    );
    let forecast = state.forecaster.forecast(&job.series, job.horizon)?;
    Ok(Json(PredictResponse::new(tag, forecast)))
}

pub async fn predict_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    if req.requests.len() > MAX_BATCH_SIZE {
        return Err(ApiError::BatchTooLarge {
            max: MAX_BATCH_SIZE,
            actual: req.requests.len(),
        });
    }

    let mut tags: Vec<Result<RequestTag, ForecastError>> = Vec::with_capacity(req.requests.len());
    let mut jobs: Vec<ForecastJob> = Vec::with_capacity(req.requests.len());
    for request in req.requests {
        match request.into_job() {
            Ok((tag, job)) => {
                tags.push(Ok(tag));
                jobs.push(job);
            }
            Err(err) => tags.push(Err(err)),
        }
    }
    tracing::info!(requests = tags.len(), valid = jobs.len(), "batch forecast");

    // rayon work stays off the async workers
    let forecaster = Arc::clone(&state.forecaster);
    let mut forecasts = tokio::task::spawn_blocking(move || forecaster.forecast_batch(&jobs))
        .await
        .map_err(|e| ApiError::Internal(format!("batch worker failed: {}", e)))?
        .into_iter();

    let results = tags
        .into_iter()
        .map(|tag| {
            let outcome = tag.and_then(|tag| {
                forecasts
                    .next()
                    .unwrap_or_else(|| {
                        Err(ForecastError::NumericalInstability(
                            "missing batch result".to_string(),
                        ))
                    })
                    .map(|forecast| PredictResponse::new(tag, forecast))
            });
            match outcome {
                Ok(response) => BatchItem::Forecast(response),
                Err(err) => BatchItem::Failed {
                    error: err.to_string(),
                },
            }
        })
        .collect();

    Ok(Json(BatchResponse { results }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_facade::Forecaster;

    fn state() -> State<AppState> {
        State(AppState {
            forecaster: Arc::new(Forecaster::new()),
        })
    }

    fn request(values: &[f64], months: i64) -> PredictRequest {
        let points: Vec<serde_json::Value> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                serde_json::json!({
                    "date": format!("{}-{:02}-01", 2022 + i / 12, i % 12 + 1),
                    "value": v
                })
            })
            .collect();
        serde_json::from_value(serde_json::json!({
            "domain": "energy",
            "organizationId": "org-42",
            "historicalData": points,
            "monthsToForecast": months
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_root() {
        let Json(body) = root().await;
        assert_eq!(body["service"], "forecast-server");
        assert_eq!(body["status"], "running");
    }

    #[tokio::test]
    async fn test_health_reports_config() {
        let Json(body) = health(state()).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["config"]["period"], 12);
    }

    #[tokio::test]
    async fn test_predict_echoes_request() {
        let values: Vec<f64> = (0..24).map(|i| 1000.0 + 5.0 * i as f64).collect();
        let Json(response) = predict(state(), Json(request(&values, 6))).await.unwrap();
        assert_eq!(response.domain, Domain::Energy);
        assert_eq!(response.organization_id, "org-42");
        assert_eq!(response.forecast.forecasted.len(), 6);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["organizationId"], "org-42");
        assert_eq!(json["domain"], "energy");
        assert_eq!(json["periods"][0], "2024-01");
        assert!(json["metadata"]["r2"].is_number());
    }

    #[tokio::test]
    async fn test_predict_insufficient_data_is_bad_request() {
        let err = predict(state(), Json(request(&[1.0, 2.0, 3.0], 6)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Forecast(ForecastError::InsufficientData { .. })
        ));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_invalid_horizon_is_bad_request() {
        let err = predict(state(), Json(request(&[5.0; 12], 0)))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_errors_map_to_500() {
        let err = ApiError::from(ForecastError::NumericalInstability("x".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_unordered_history_is_bad_request() {
        let mut req = request(&[1.0; 8], 3);
        req.historical_data.swap(0, 1);
        let err = predict(state(), Json(req)).await.unwrap_err();
        assert!(matches!(err, ApiError::Forecast(ForecastError::InvalidSeries(_))));
    }

    #[tokio::test]
    async fn test_batch_keeps_order_and_isolates_failures() {
        let mut unordered = request(&[1.0; 8], 3);
        unordered.historical_data.swap(2, 3);
        let batch = BatchRequest {
            requests: vec![
                request(&[10.0; 12], 2),
                unordered,
                request(&[1.0, 2.0], 2),
                request(&[20.0; 12], 1),
            ],
        };

        let Json(response) = predict_batch(state(), Json(batch)).await.unwrap();
        assert_eq!(response.results.len(), 4);
        match &response.results[0] {
            BatchItem::Forecast(r) => assert!((r.forecast.forecasted[0] - 10.0).abs() < 1e-9),
            other => panic!("expected forecast, got {:?}", other),
        }
        assert!(matches!(&response.results[1], BatchItem::Failed { error } if error.contains("Invalid series")));
        assert!(matches!(&response.results[2], BatchItem::Failed { error } if error.contains("Insufficient data")));
        match &response.results[3] {
            BatchItem::Forecast(r) => assert!((r.forecast.forecasted[0] - 20.0).abs() < 1e-9),
            other => panic!("expected forecast, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_oversized_batch_rejected() {
        let batch = BatchRequest {
            requests: (0..=MAX_BATCH_SIZE).map(|_| request(&[10.0; 12], 1)).collect(),
        };
        let err = predict_batch(state(), Json(batch)).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::BatchTooLarge { max: MAX_BATCH_SIZE, actual } if actual == MAX_BATCH_SIZE + 1
        ));
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_unknown_domain_rejected() {
        let parsed = serde_json::from_value::<PredictRequest>(serde_json::json!({
            "domain": "finance",
            "organizationId": "org",
            "historicalData": [],
            "monthsToForecast": 3
        }));
        assert!(parsed.is_err());
    }
}
