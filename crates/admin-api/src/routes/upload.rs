//! Media uploads for avatars and logos.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Accepted image content types and their stored extensions.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/svg+xml", "svg"),
];

/// Upload size cap in bytes (5 MB).
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
}

/// Accept one multipart image and store it in the media directory.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let Some((_, extension)) = ALLOWED_TYPES
            .iter()
            .find(|(mime, _)| *mime == content_type)
        else {
            return Err(ApiError::BadRequest(format!(
                "unsupported content type: {content_type}"
            )));
        };

        let data = field
            .bytes()
            .await
            .map_err(|err| ApiError::BadRequest(err.to_string()))?;
        if data.is_empty() {
            return Err(ApiError::BadRequest("empty upload".to_string()));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::BadRequest(format!(
                "upload exceeds {MAX_UPLOAD_BYTES} bytes"
            )));
        }

        let filename = format!("{}.{extension}", Uuid::new_v4());
        let path = std::path::Path::new(&state.upload_dir).join(&filename);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|err| ApiError::Internal(format!("failed to store upload: {err}")))?;

        info!(file = %filename, bytes = data.len(), "Upload stored");

        let base = state.public_base_url.trim_end_matches('/');
        return Ok(Json(UploadResponse {
            success: true,
            url: format!("{base}/media/{filename}"),
        }));
    }

    Err(ApiError::BadRequest("missing 'file' field".to_string()))
}
