//! UI preference handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use shared::Language;

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguagePreference {
    pub language: Language,
}

pub async fn get_language(State(state): State<AppState>) -> Json<LanguagePreference> {
    Json(LanguagePreference {
        language: state.session.read().await.language(),
    })
}

pub async fn set_language(
    State(state): State<AppState>,
    Json(body): Json<LanguagePreference>,
) -> AppResult<StatusCode> {
    state.session.write().await.set_language(body.language)?;
    Ok(StatusCode::NO_CONTENT)
}
