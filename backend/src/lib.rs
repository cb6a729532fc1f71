//! HarvestGuard - Backend Library
//!
//! Crop storage risk advisories for farmers in Bangladesh: division
//! forecasts, harvested batch tracking and spoilage risk estimates.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use crate::config::Config;

use services::{AppSession, KeyValueStore, ScannerService, WeatherService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<RwLock<AppSession>>,
    pub weather: WeatherService,
    pub scanner: ScannerService,
}

impl AppState {
    /// Build the state from configuration, restoring the session from `store`
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> error::AppResult<Self> {
        let session = AppSession::open(store, config.auth.bcrypt_cost)?;
        let weather = WeatherService::from_config(&config.weather);
        let scanner = ScannerService::new(config.scanner.analysis_delay());

        Ok(Self {
            config: Arc::new(config),
            session: Arc::new(RwLock::new(session)),
            weather,
            scanner,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
