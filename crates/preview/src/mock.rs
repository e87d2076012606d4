//! Mock respond clients for tests and offline previews.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::respond::{RespondClient, RespondError, RespondReply, RespondRequest};

/// Echoes the user's message back, optionally with a prefix.
///
/// Useful for exercising the preview flow without any AI backend.
#[derive(Debug, Clone, Default)]
pub struct EchoRespondClient {
    prefix: Option<String>,
}

impl EchoRespondClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl RespondClient for EchoRespondClient {
    async fn respond(&self, request: RespondRequest) -> Result<RespondReply, RespondError> {
        let reply = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, request.message),
            None => request.message,
        };
        Ok(RespondReply { reply })
    }

    fn name(&self) -> &str {
        "EchoRespondClient"
    }
}

/// Always fails with a fixed HTTP status.
#[derive(Debug, Clone)]
pub struct FailingRespondClient {
    code: u16,
    message: String,
}

impl FailingRespondClient {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[async_trait]
impl RespondClient for FailingRespondClient {
    async fn respond(&self, _request: RespondRequest) -> Result<RespondReply, RespondError> {
        Err(RespondError::Status {
            code: self.code,
            message: self.message.clone(),
        })
    }

    fn name(&self) -> &str {
        "FailingRespondClient"
    }
}

/// Echoes like [`EchoRespondClient`] while keeping the last request for
/// inspection, so tests can assert on what actually went over the wire.
#[derive(Debug, Clone, Default)]
pub struct RecordingRespondClient {
    last: Arc<Mutex<Option<RespondRequest>>>,
}

impl RecordingRespondClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent request, if any call was made.
    pub fn last_request(&self) -> Option<RespondRequest> {
        self.last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl RespondClient for RecordingRespondClient {
    async fn respond(&self, request: RespondRequest) -> Result<RespondReply, RespondError> {
        let reply = request.message.clone();
        *self
            .last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request);
        Ok(RespondReply { reply })
    }

    fn name(&self) -> &str {
        "RecordingRespondClient"
    }
}

/// Wraps another client and delays every reply, for exercising the typing
/// indicator.
pub struct DelayedRespondClient {
    inner: Box<dyn RespondClient>,
    delay: Duration,
}

impl DelayedRespondClient {
    pub fn new(inner: Box<dyn RespondClient>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl RespondClient for DelayedRespondClient {
    async fn respond(&self, request: RespondRequest) -> Result<RespondReply, RespondError> {
        tokio::time::sleep(self.delay).await;
        self.inner.respond(request).await
    }

    fn name(&self) -> &str {
        "DelayedRespondClient"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> RespondRequest {
        RespondRequest {
            message: text.to_string(),
            widget_id: "w-1".to_string(),
            user_id: "preview".to_string(),
            conversation_id: "c-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_echo() {
        let client = EchoRespondClient::new();
        let reply = client.respond(request("Hej!")).await.unwrap();
        assert_eq!(reply.reply, "Hej!");
    }

    #[tokio::test]
    async fn test_echo_with_prefix() {
        let client = EchoRespondClient::with_prefix("Svar: ");
        let reply = client.respond(request("Hej!")).await.unwrap();
        assert_eq!(reply.reply, "Svar: Hej!");
    }

    #[tokio::test]
    async fn test_failing_preserves_status() {
        let client = FailingRespondClient::new(404, "widget not found");
        let err = client.respond(request("Hej")).await.unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }

    #[tokio::test]
    async fn test_recording_keeps_last_request() {
        let client = RecordingRespondClient::new();
        assert!(client.last_request().is_none());

        let reply = client.respond(request("Hej!")).await.unwrap();
        assert_eq!(reply.reply, "Hej!");
        let last = client.last_request().unwrap();
        assert_eq!(last.conversation_id, "c-1");
    }

    #[tokio::test]
    async fn test_delayed_wraps_inner() {
        let client = DelayedRespondClient::new(
            Box::new(EchoRespondClient::new()),
            Duration::from_millis(5),
        );
        let reply = client.respond(request("ping")).await.unwrap();
        assert_eq!(reply.reply, "ping");
    }
}
