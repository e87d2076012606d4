//! Support request and manual review triage routes.
//!
//! Both ticket kinds share the same handlers; illegal workflow moves come
//! back as 409 via the database error mapping.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use database::{Ticket, TicketKind, TicketStatus};

use crate::error::{ApiError, Result};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// Status move and/or note edit for one ticket.
#[derive(Deserialize)]
pub struct UpdateTicketRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn parse_status(raw: &str) -> Result<TicketStatus> {
    TicketStatus::parse(raw)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown ticket status: {raw}")))
}

async fn list_tickets(
    state: &AppState,
    kind: TicketKind,
    query: ListQuery,
) -> Result<Json<Vec<Ticket>>> {
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let tickets = database::ticket::list_tickets(state.db.pool(), kind, status).await?;
    Ok(Json(tickets))
}

async fn update_ticket(
    state: &AppState,
    kind: TicketKind,
    id: String,
    req: UpdateTicketRequest,
) -> Result<Json<Ticket>> {
    let pool = state.db.pool();

    if let Some(notes) = &req.notes {
        database::ticket::update_notes(pool, kind, &id, notes).await?;
    }

    if let Some(raw) = &req.status {
        let to = parse_status(raw)?;
        let ticket = database::ticket::transition_ticket(pool, kind, &id, to).await?;
        database::audit::record(pool, "admin", "ticket.transition", "ticket", &id, raw).await?;
        info!(ticket_id = %id, status = %raw, "Ticket transitioned");
        return Ok(Json(ticket));
    }

    let ticket = database::ticket::get_ticket(pool, kind, &id).await?;
    Ok(Json(ticket))
}

/// List manual reviews, optionally filtered by status.
pub async fn list_manual_reviews(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Ticket>>> {
    list_tickets(&state, TicketKind::ManualReview, query).await
}

/// Update a manual review's status and/or notes.
pub async fn update_manual_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTicketRequest>,
) -> Result<Json<Ticket>> {
    update_ticket(&state, TicketKind::ManualReview, id, req).await
}

/// List support requests, optionally filtered by status.
pub async fn list_support_requests(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Ticket>>> {
    list_tickets(&state, TicketKind::SupportRequest, query).await
}

/// Update a support request's status and/or notes.
pub async fn update_support_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTicketRequest>,
) -> Result<Json<Ticket>> {
    update_ticket(&state, TicketKind::SupportRequest, id, req).await
}
