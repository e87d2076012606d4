//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or producing configuration documents.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be (de)serialized against the schema.
    #[error("invalid widget configuration: {0}")]
    Json(#[from] serde_json::Error),
}
