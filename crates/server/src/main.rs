//! # forecast-server
//!
//! REST API server for the monthly metric forecasting engine.

use axum::{
    routing::{get, post},
    Router,
};
use forecast_facade::{ForecastConfig, Forecaster};
use std::env;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub forecaster: Arc<Forecaster>,
}

/// Engine configuration from the JSON file named by `FORECAST_CONFIG`,
/// or the defaults when unset.
fn load_config() -> Result<ForecastConfig, Box<dyn Error>> {
    match env::var("FORECAST_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| format!("cannot read FORECAST_CONFIG {}: {}", path, e))?;
            Ok(serde_json::from_str(&raw)?)
        }
        Err(_) => Ok(ForecastConfig::default()),
    }
}

fn app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/predict", post(routes::predict))
        .route("/predict/batch", post(routes::predict_batch))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forecast_server=info,forecast_core=info,tower_http=info".into()),
        )
        .init();

    let forecaster = Forecaster::with_config(load_config()?)?;
    let state = AppState {
        forecaster: Arc::new(forecaster),
    };

    // Server configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8001".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid number: {}", e))?;
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT configuration: {}", e))?;

    tracing::info!("forecast-server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
