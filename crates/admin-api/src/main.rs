//! Admin REST API for the chat-widget platform.
//!
//! Serves the widget configuration store, the live preview projection, the
//! respond proxy, media uploads, analytics, the audit trail, and the ticket
//! workflows as JSON endpoints. Authentication is handled by an upstream
//! proxy.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use database::Database;
use preview::HttpRespondClient;
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting admin API server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Respond backend client
    let respond = Arc::new(HttpRespondClient::new(&config.respond_url)?);

    // Ensure the upload directory exists before serving from it
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    // Build application state
    let state = AppState::new(
        db,
        respond,
        config.upload_dir.clone(),
        config.public_base_url.clone(),
    );

    // Build router
    let app = routes::router()
        .nest_service("/media", ServeDir::new(&config.upload_dir))
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Admin API server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
