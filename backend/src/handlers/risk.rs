//! HTTP handler for the risk dashboard

use axum::{
    extract::{Query, State},
    Json,
};

use super::weather::DivisionQuery;
use crate::services::risk::{build_report, RiskReport};
use crate::AppState;

/// Assess active batches against the division's forecast
pub async fn get_risk_report(
    State(state): State<AppState>,
    Query(query): Query<DivisionQuery>,
) -> Json<RiskReport> {
    let forecast = state.weather.get_forecast(query.division()).await;
    let session = state.session.read().await;
    Json(build_report(&forecast, session.crops().list()))
}
