//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Admin API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// AI respond backend endpoint.
    pub respond_url: String,
    /// Directory uploaded media files are written to.
    pub upload_dir: String,
    /// Public base URL used in embed tags and upload URLs.
    pub public_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ADMIN_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:admin.db?mode=rwc` |
    /// | `RESPOND_URL` | AI respond backend endpoint | `http://127.0.0.1:8080/api/respond-responses` |
    /// | `UPLOAD_DIR` | Media upload directory | `uploads` |
    /// | `PUBLIC_BASE_URL` | Public base URL for generated links | `http://127.0.0.1:8790` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("ADMIN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:admin.db?mode=rwc".to_string());

        let respond_url = env::var("RESPOND_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080/api/respond-responses".to_string());

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8790".to_string());

        Ok(Self {
            addr,
            database_url,
            respond_url,
            upload_dir,
            public_base_url,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ADMIN_ADDR format")]
    InvalidAddr,
}
