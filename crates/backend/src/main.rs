//! Top 20 Backend Server
//!
//! Provides:
//! - REST API for submitting a ranked list of 20 players (one per client address)
//! - Listing submissions and per-player position statistics
//! - PostgreSQL storage with wait-for-ready startup

mod bootstrap;
mod client_addr;
mod config;
mod db;
mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bootstrap::RetryPolicy;
use crate::config::Config;
use crate::db::SubmissionStore;
use crate::error::StartupError;

pub struct AppState {
    pub db: Arc<dyn SubmissionStore>,
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "top20_backend=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        return Err(e);
    }
    Ok(())
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let store = bootstrap::connect(&config, &RetryPolicy::default()).await?;

    let state = Arc::new(AppState {
        db: Arc::new(store),
    });

    let app = routes::router(state);

    let addr = config.bind_address();
    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
