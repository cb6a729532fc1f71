//! Route definitions for HarvestGuard

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};

use crate::{handlers, middleware::require_session, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::service_status))
        // Weather (public)
        .route("/weather", get(handlers::get_forecast))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Preferences (public)
        .route(
            "/preferences/language",
            put(handlers::set_language).get(handlers::get_language),
        )
        // Protected routes - crop management
        .nest("/crops", crop_routes(state.clone()))
        // Protected routes - risk dashboard
        .nest("/risk", risk_routes(state.clone()))
        // Protected routes - freshness scanner
        .nest("/scanner", scanner_routes(state))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/me", get(handlers::me))
}

/// Crop batch routes (protected)
fn crop_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops).post(handlers::create_crop))
        .route("/export", get(handlers::export_crops))
        .route("/summary", get(handlers::crop_summary))
        .route(
            "/:crop_id",
            patch(handlers::update_crop).delete(handlers::delete_crop),
        )
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

/// Risk dashboard routes (protected)
fn risk_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_risk_report))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

/// Scanner routes (protected)
fn scanner_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::scan_crop))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}
