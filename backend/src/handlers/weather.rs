//! HTTP handlers for weather forecasts

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{Division, Forecast};

use crate::AppState;

/// Query parameters selecting a division
#[derive(Debug, Default, Deserialize)]
pub struct DivisionQuery {
    pub division: Option<String>,
}

impl DivisionQuery {
    /// The requested division, Dhaka when missing or unknown
    pub fn division(&self) -> Division {
        Division::resolve(self.division.as_deref())
    }
}

/// Five-day forecast for a division. Never fails.
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<DivisionQuery>,
) -> Json<Forecast> {
    Json(state.weather.get_forecast(query.division()).await)
}
