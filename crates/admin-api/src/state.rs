//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use preview::RespondClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// AI respond backend client.
    pub respond: Arc<dyn RespondClient>,
    /// Media upload directory.
    pub upload_dir: String,
    /// Public base URL for generated links.
    pub public_base_url: String,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        db: Database,
        respond: Arc<dyn RespondClient>,
        upload_dir: String,
        public_base_url: String,
    ) -> Self {
        Self {
            db,
            respond,
            upload_dir,
            public_base_url,
        }
    }
}
