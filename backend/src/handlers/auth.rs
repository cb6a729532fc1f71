//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use shared::User;

use crate::error::{AppError, AppResult};
use crate::services::auth::RegisterInput;
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register endpoint handler. The new account is signed in.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    let mut session = state.session.write().await;
    if !session.register(body)? {
        return Err(AppError::DuplicateEntry("email".to_string()));
    }

    let user = session.current_user().cloned().ok_or_else(AppError::login_required)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<User>> {
    let mut session = state.session.write().await;
    if !session.login(&body.email, &body.password)? {
        return Err(AppError::InvalidCredentials);
    }

    let user = session.current_user().cloned().ok_or(AppError::InvalidCredentials)?;
    Ok(Json(user))
}

/// Logout endpoint handler. Discards the crop collection.
pub async fn logout(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.session.write().await.logout()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Currently signed-in user
pub async fn me(State(state): State<AppState>) -> AppResult<Json<User>> {
    state
        .session
        .read()
        .await
        .current_user()
        .cloned()
        .map(Json)
        .ok_or_else(AppError::login_required)
}
