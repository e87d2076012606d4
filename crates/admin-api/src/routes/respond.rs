//! The respond proxy: chat turns from embedded widgets and the preview.
//!
//! Loads the widget, enforces demo limits, forwards the turn to the AI
//! backend, and persists both sides of the exchange for analytics.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use preview::{RespondReply, RespondRequest};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// One incoming chat turn.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondIn {
    pub message: String,
    pub widget_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Forward one chat turn to the AI backend and persist the exchange.
pub async fn respond(
    State(state): State<AppState>,
    Json(req): Json<RespondIn>,
) -> Result<Json<RespondReply>> {
    let pool = state.db.pool();

    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    let widget = database::widget::get_widget(pool, &req.widget_id).await?;
    let config = parse_prompt(&widget)?;

    // A widget without a prompt reference cannot answer; fail before any
    // network round trip.
    let Some(_prompt_id) = config else {
        return Err(ApiError::BadRequest(
            "widget has no prompt configured".to_string(),
        ));
    };

    if widget.demo_blocked(&now_utc()) {
        warn!(widget_id = %widget.id, "Demo widget blocked");
        return Err(ApiError::DemoLimit(
            "demo widget has expired or reached its usage limit".to_string(),
        ));
    }

    let user_id = req.user_id.unwrap_or_else(|| "anonymous".to_string());
    let conversation_id = req
        .conversation_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let reply = state
        .respond
        .respond(RespondRequest {
            message: req.message.clone(),
            widget_id: widget.id.clone(),
            user_id: user_id.clone(),
            conversation_id: conversation_id.clone(),
        })
        .await?;

    if widget.is_demo {
        database::widget::increment_demo_usage(pool, &widget.id).await?;
    }

    // Persist both turns only after a successful reply; a failed exchange
    // leaves no half-conversation behind.
    database::conversation::ensure_conversation(pool, &conversation_id, &widget.id, &user_id)
        .await?;
    database::conversation::append_message(pool, &conversation_id, "user", &req.message).await?;
    database::conversation::append_message(pool, &conversation_id, "assistant", &reply.reply)
        .await?;

    info!(
        widget_id = %widget.id,
        conversation_id = %conversation_id,
        backend = state.respond.name(),
        "Respond turn completed"
    );

    Ok(Json(reply))
}

/// Extract the prompt reference from the stored document.
fn parse_prompt(widget: &database::WidgetRecord) -> Result<Option<String>> {
    let value: serde_json::Value = serde_json::from_str(&widget.config)
        .map_err(|err| ApiError::Internal(format!("stored config is not JSON: {err}")))?;
    Ok(value
        .get("promptId")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string))
}

/// Current UTC time in the same `YYYY-MM-DD HH:MM:SS` shape the database
/// writes, so demo expiry comparisons line up.
fn now_utc() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
