//! The AI respond backend seam.
//!
//! The admin preview talks to the same `/api/respond-responses` contract the
//! embedded widget uses. Failures keep their HTTP status as a number so
//! callers can classify them without parsing error strings.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One chat turn sent to the respond backend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    pub message: String,
    pub widget_id: String,
    pub user_id: String,
    pub conversation_id: String,
}

/// The backend's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondReply {
    pub reply: String,
}

/// Errors from the respond backend.
#[derive(Debug, Error)]
pub enum RespondError {
    /// The endpoint answered with a non-2xx status. The numeric code is
    /// preserved for classification.
    #[error("respond endpoint returned HTTP {code}: {message}")]
    Status { code: u16, message: String },

    /// The request never completed (connection, timeout, decode).
    #[error("respond request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RespondError {
    /// The HTTP status code, if the backend answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RespondError::Status { code, .. } => Some(*code),
            RespondError::Transport(_) => None,
        }
    }
}

/// A client for the AI respond backend.
///
/// Object-safe so sessions can hold `Box<dyn RespondClient>`; mock
/// implementations live in [`crate::mock`].
#[async_trait]
pub trait RespondClient: Send + Sync {
    /// Send one chat turn and await the assistant reply.
    async fn respond(&self, request: RespondRequest) -> Result<RespondReply, RespondError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// HTTP client for a real respond endpoint.
#[derive(Debug, Clone)]
pub struct HttpRespondClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpRespondClient {
    /// Build a client for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RespondError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl RespondClient for HttpRespondClient {
    async fn respond(&self, request: RespondRequest) -> Result<RespondReply, RespondError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Read the status before the body is consumed; classification
            // happens on the number, not on the message text.
            let message = response.text().await.unwrap_or_default();
            return Err(RespondError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let reply = response.json::<RespondReply>().await?;
        Ok(reply)
    }

    fn name(&self) -> &str {
        "HttpRespondClient"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_accessor() {
        let err = RespondError::Status {
            code: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = RespondRequest {
            message: "Hej".to_string(),
            widget_id: "w-1".to_string(),
            user_id: "preview".to_string(),
            conversation_id: "c-1".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value["widgetId"].is_string());
        assert!(value["conversationId"].is_string());
    }
}
