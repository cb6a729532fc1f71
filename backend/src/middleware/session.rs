//! Session gate for routes that need a signed-in farmer

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::User;

use crate::error::AppError;
use crate::AppState;

/// Rejects the request with 401 unless a user is signed in, and makes the
/// user available to handlers through [`CurrentUser`].
pub async fn require_session(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let user = state.session.read().await.current_user().cloned();

    match user {
        Some(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        None => AppError::login_required().into_response(),
    }
}

/// Extractor for the signed-in user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(AppError::login_required)
    }
}
