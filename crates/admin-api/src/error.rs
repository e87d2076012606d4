//! Error types for the admin API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use preview::RespondError;
use widget_config::FieldError;

/// Errors that can occur in the admin API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The submitted configuration violated one or more field constraints.
    #[error("validation failed: {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Malformed request (bad JSON document, bad query parameter, ...).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A demo widget has expired or used up its quota.
    #[error("demo limit reached: {0}")]
    DemoLimit(String),

    /// The AI respond backend answered with a failure.
    #[error(transparent)]
    Respond(#[from] RespondError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(errors) => {
                let body = serde_json::json!({
                    "error": "Validation failed",
                    "fields": errors,
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::DemoLimit(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::Respond(err) => {
                tracing::warn!("Respond backend error: {}", err);
                // Pass the upstream status through where there is one; a
                // transport failure has no status and maps to 502.
                let status = err
                    .status_code()
                    .and_then(|code| StatusCode::from_u16(code).ok())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (status, err.to_string())
            }
            ApiError::Database(database::DatabaseError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                format!("{entity} not found: {id}"),
            ),
            ApiError::Database(database::DatabaseError::InvalidTransition { from, to }) => (
                StatusCode::CONFLICT,
                format!("illegal status transition: {from} -> {to}"),
            ),
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": body
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for admin API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::Database(database::DatabaseError::NotFound {
            entity: "widget",
            id: "w-1".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_transition_maps_to_409() {
        let err = ApiError::Database(database::DatabaseError::InvalidTransition {
            from: "pending".to_string(),
            to: "completed".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_maps_to_422() {
        let err = ApiError::Validation(vec![FieldError {
            field: "appearance.width".to_string(),
            message: "Width must be between 300 and 800 pixels".to_string(),
        }]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_respond_status_passes_through() {
        let err = ApiError::Respond(RespondError::Status {
            code: 404,
            message: "unknown widget".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
