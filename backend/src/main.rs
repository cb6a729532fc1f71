//! HarvestGuard - Backend Server
//!
//! Serves weather forecasts, crop batch records and spoilage risk
//! assessments for farmers across the eight divisions of Bangladesh.

use std::{net::SocketAddr, sync::Arc};

use harvestguard_backend::{create_app, services::FileStore, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harvestguard_server=debug,harvestguard_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting HarvestGuard Server");
    tracing::info!("Environment: {}", config.environment);

    // Open local storage
    tracing::info!("Opening data directory {}", config.storage.data_dir.display());
    let store = FileStore::open(&config.storage.data_dir)?;

    // Create application state
    let port = config.server.port;
    let host: std::net::IpAddr = config.server.host.parse()?;
    let state = AppState::new(config, Arc::new(store))?;

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from((host, port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
