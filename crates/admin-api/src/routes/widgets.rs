//! Widget configuration routes: CRUD, preview, and the embed artifacts.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use preview::{render, DeviceView, RenderState, RenderTree, ThemeHint, WidgetMeta};
use widget_config::{from_partial, validate, WidgetConfig, WidgetStatus};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// A widget as the console lists it: record metadata plus the parsed
/// configuration document.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetResponse {
    pub id: String,
    pub organization_id: String,
    pub is_demo: bool,
    pub created_at: String,
    pub updated_at: String,
    pub config: WidgetConfig,
}

/// Request to create a widget from a partial document.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWidgetRequest {
    pub organization_id: String,
    /// Partial configuration merged over defaults; may be omitted entirely.
    #[serde(default)]
    pub config: serde_json::Value,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(rename = "organizationId")]
    pub organization_id: String,
}

/// Parse a stored configuration column back into a document.
fn parse_config(record: &database::WidgetRecord) -> Result<WidgetConfig> {
    let partial: serde_json::Value = serde_json::from_str(&record.config)
        .map_err(|err| ApiError::Internal(format!("stored config is not JSON: {err}")))?;
    let mut config =
        from_partial(partial).map_err(|err| ApiError::Internal(err.to_string()))?;
    config.id = record.id.clone();
    Ok(config)
}

fn widget_response(record: database::WidgetRecord) -> Result<WidgetResponse> {
    let config = parse_config(&record)?;
    Ok(WidgetResponse {
        id: record.id,
        organization_id: record.organization_id,
        is_demo: record.is_demo,
        created_at: record.created_at,
        updated_at: record.updated_at,
        config,
    })
}

fn status_str(status: WidgetStatus) -> &'static str {
    match status {
        WidgetStatus::Active => "active",
        WidgetStatus::Inactive => "inactive",
    }
}

/// List an organization's widgets.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<WidgetResponse>>> {
    let records = database::widget::list_widgets(state.db.pool(), &query.organization_id).await?;
    let widgets = records
        .into_iter()
        .map(widget_response)
        .collect::<Result<Vec<_>>>()?;
    Ok(Json(widgets))
}

/// Create a widget from a partial document merged over defaults.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateWidgetRequest>,
) -> Result<Json<WidgetResponse>> {
    let pool = state.db.pool();

    // Quota check against the organization's plan.
    let org = database::organization::get_organization(pool, &req.organization_id).await?;
    let count = database::widget::count_widgets(pool, &req.organization_id).await?;
    if count >= org.widget_limit {
        return Err(ApiError::BadRequest(format!(
            "widget limit reached ({} of {})",
            count, org.widget_limit
        )));
    }

    let config = from_partial(req.config).map_err(|err| ApiError::BadRequest(err.to_string()))?;
    let errors = validate(&config);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let id = Uuid::new_v4().to_string();
    let record = database::WidgetRecord {
        id: id.clone(),
        organization_id: req.organization_id.clone(),
        name: config.name.clone(),
        description: config.description.clone(),
        status: status_str(config.status).to_string(),
        is_demo: false,
        demo_expires_at: None,
        demo_usage_limit: None,
        demo_usage_count: 0,
        config: serde_json::to_string(&config)
            .map_err(|err| ApiError::Internal(err.to_string()))?,
        created_at: String::new(),
        updated_at: String::new(),
    };
    database::widget::create_widget(pool, &record).await?;
    database::audit::record(pool, "admin", "widget.create", "widget", &id, &config.name).await?;

    info!(widget_id = %id, organization_id = %req.organization_id, "Widget created");

    let record = database::widget::get_widget(pool, &id).await?;
    Ok(Json(widget_response(record)?))
}

/// Get a widget with its full configuration document.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WidgetResponse>> {
    let record = database::widget::get_widget(state.db.pool(), &id).await?;
    Ok(Json(widget_response(record)?))
}

/// Replace a widget's configuration document in full. Last write wins.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(document): Json<serde_json::Value>,
) -> Result<Json<WidgetResponse>> {
    let pool = state.db.pool();

    // 404 before 422: a document for a deleted widget is not a validation
    // problem.
    database::widget::get_widget(pool, &id).await?;

    let mut config =
        from_partial(document).map_err(|err| ApiError::BadRequest(err.to_string()))?;
    config.id = id.clone();

    let errors = validate(&config);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    database::widget::update_widget(
        pool,
        &id,
        &config.name,
        &config.description,
        status_str(config.status),
        &serde_json::to_string(&config).map_err(|err| ApiError::Internal(err.to_string()))?,
    )
    .await?;
    database::audit::record(pool, "admin", "widget.update", "widget", &id, &config.name).await?;

    info!(widget_id = %id, "Widget configuration replaced");

    let record = database::widget::get_widget(pool, &id).await?;
    Ok(Json(widget_response(record)?))
}

/// Delete a widget.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let pool = state.db.pool();
    database::widget::delete_widget(pool, &id).await?;
    database::audit::record(pool, "admin", "widget.delete", "widget", &id, "").await?;

    info!(widget_id = %id, "Widget deleted");

    Ok(Json(serde_json::json!({ "success": true })))
}

#[derive(Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

/// Serve the live preview projection for a widget as JSON.
pub async fn preview(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<RenderTree>> {
    let view = match query.view.as_deref() {
        None | Some("desktop") => DeviceView::Desktop,
        Some("mobile") => DeviceView::Mobile,
        Some(other) => {
            return Err(ApiError::BadRequest(format!("unknown view: {other}")));
        }
    };
    let hint = match query.theme.as_deref() {
        None | Some("light") => ThemeHint::Light,
        Some("dark") => ThemeHint::Dark,
        Some(other) => {
            return Err(ApiError::BadRequest(format!("unknown theme: {other}")));
        }
    };

    let record = database::widget::get_widget(state.db.pool(), &id).await?;
    let config = parse_config(&record)?;
    let meta = WidgetMeta {
        id: record.id,
        name: record.name,
    };

    let tree = render(&meta, &config, view, &RenderState::new(hint));
    Ok(Json(tree))
}

#[derive(Serialize)]
pub struct EmbedTagResponse {
    pub tag: String,
}

/// The script-tag artifact a site owner pastes into their page.
pub async fn embed_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmbedTagResponse>> {
    // Only existing widgets get a tag.
    database::widget::get_widget(state.db.pool(), &id).await?;
    Ok(Json(EmbedTagResponse {
        tag: widget_config::embed_tag(&state.public_base_url, &id),
    }))
}

/// The embed loader script served to embedding pages.
///
/// Inactive widgets get a no-op script so stale embeds stay silent instead
/// of erroring on the host page.
pub async fn embed_loader(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let record = database::widget::get_widget(state.db.pool(), &id).await?;
    let config = parse_config(&record)?;

    let body = if record.status == "active" {
        let config_json = serde_json::to_string(&config)
            .map_err(|err| ApiError::Internal(err.to_string()))?;
        format!(
            "(function(){{window.__widgetConfig={config_json};\
             var s=document.createElement('script');\
             s.src='{base}/media/widget.js';s.async=true;\
             document.head.appendChild(s);}})();\n",
            base = state.public_base_url.trim_end_matches('/'),
        )
    } else {
        "/* widget inactive */\n".to_string()
    };

    Ok(([(header::CONTENT_TYPE, "text/javascript")], body))
}
