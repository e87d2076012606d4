//! Organization routes, including the console's organization switcher.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use database::Organization;

use crate::error::Result;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    pub name: String,
    #[serde(default = "default_plan")]
    pub plan: String,
    #[serde(default = "default_widget_limit")]
    pub widget_limit: i64,
}

fn default_plan() -> String {
    "starter".to_string()
}

fn default_widget_limit() -> i64 {
    3
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationRequest {
    pub name: String,
    pub plan: String,
    pub widget_limit: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchRequest {
    pub user_id: String,
}

/// List all organizations.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Organization>>> {
    let orgs = database::organization::list_organizations(state.db.pool()).await?;
    Ok(Json(orgs))
}

/// Create an organization.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<Json<Organization>> {
    let pool = state.db.pool();
    let org = Organization {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        plan: req.plan,
        widget_limit: req.widget_limit,
        created_at: String::new(),
    };
    database::organization::create_organization(pool, &org).await?;

    info!(organization_id = %org.id, "Organization created");

    let org = database::organization::get_organization(pool, &org.id).await?;
    Ok(Json(org))
}

/// Get an organization by id.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Organization>> {
    let org = database::organization::get_organization(state.db.pool(), &id).await?;
    Ok(Json(org))
}

/// Update an organization's name, plan, and widget quota.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrganizationRequest>,
) -> Result<Json<Organization>> {
    let pool = state.db.pool();
    database::organization::update_organization(pool, &id, &req.name, &req.plan, req.widget_limit)
        .await?;
    let org = database::organization::get_organization(pool, &id).await?;
    Ok(Json(org))
}

/// Switch a user's active organization.
pub async fn switch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SwitchRequest>,
) -> Result<Json<serde_json::Value>> {
    let pool = state.db.pool();
    database::organization::switch_active_organization(pool, &req.user_id, &id).await?;
    database::audit::record(pool, &req.user_id, "organization.switch", "organization", &id, "")
        .await?;

    info!(user_id = %req.user_id, organization_id = %id, "Active organization switched");

    Ok(Json(serde_json::json!({ "success": true })))
}
