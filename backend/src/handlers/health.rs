//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub weather: String,
}

/// Root endpoint
pub async fn root() -> &'static str {
    "HarvestGuard API v1.0"
}

/// Liveness check
pub async fn health_check() -> &'static str {
    "OK"
}

/// Service status, including whether forecasts come from the live provider
pub async fn service_status(State(state): State<AppState>) -> Json<HealthResponse> {
    let weather = if state.weather.has_live_provider() {
        "live"
    } else {
        "synthetic"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        weather: weather.to_string(),
    })
}
