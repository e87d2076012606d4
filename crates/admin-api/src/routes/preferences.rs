//! Console preference routes.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceQuery {
    #[serde(default = "default_user")]
    pub user_id: String,
}

fn default_user() -> String {
    "admin".to_string()
}

#[derive(Deserialize)]
pub struct SetPreferenceRequest {
    pub value: String,
}

#[derive(Serialize)]
pub struct PreferenceResponse {
    pub key: String,
    pub value: String,
}

/// Get one preference value.
pub async fn get_one(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<PreferenceQuery>,
) -> Result<Json<PreferenceResponse>> {
    let value = database::preference::get_preference(state.db.pool(), &query.user_id, &key)
        .await?
        .ok_or(ApiError::Database(database::DatabaseError::NotFound {
            entity: "preference",
            id: key.clone(),
        }))?;

    Ok(Json(PreferenceResponse { key, value }))
}

/// Set a preference, replacing any previous value.
pub async fn set(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<PreferenceQuery>,
    Json(req): Json<SetPreferenceRequest>,
) -> Result<Json<PreferenceResponse>> {
    database::preference::set_preference(state.db.pool(), &query.user_id, &key, &req.value)
        .await?;

    Ok(Json(PreferenceResponse {
        key,
        value: req.value,
    }))
}
