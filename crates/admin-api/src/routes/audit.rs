//! Audit trail listing.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use database::audit::AuditPage;

use crate::error::Result;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AuditQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub action: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    50
}

/// Fetch one page of the audit trail, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<AuditPage>> {
    let page = database::audit::list_audit_logs(
        state.db.pool(),
        query.page,
        query.limit,
        query.action.as_deref(),
    )
    .await?;
    Ok(Json(page))
}
