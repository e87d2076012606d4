//! Route handlers for the admin API.

pub mod analytics;
pub mod audit;
pub mod health;
pub mod organizations;
pub mod preferences;
pub mod respond;
pub mod tickets;
pub mod upload;
pub mod widgets;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Widget configuration store
        .route(
            "/api/admin/widgets",
            get(widgets::list).post(widgets::create),
        )
        .route(
            "/api/admin/widgets/:id",
            get(widgets::get_one)
                .put(widgets::update)
                .delete(widgets::delete),
        )
        .route("/api/admin/widgets/:id/preview", get(widgets::preview))
        .route("/api/admin/widgets/:id/embed-tag", get(widgets::embed_tag))
        .route("/api/widget-embed/:id", get(widgets::embed_loader))
        // Respond proxy
        .route("/api/respond-responses", post(respond::respond))
        // Media uploads
        .route("/api/admin/upload", post(upload::upload))
        // Organizations
        .route(
            "/api/organizations",
            get(organizations::list).post(organizations::create),
        )
        .route(
            "/api/organizations/:id",
            get(organizations::get_one).put(organizations::update),
        )
        .route("/api/organizations/:id/switch", post(organizations::switch))
        // Audit trail
        .route("/api/admin/audit-logs", get(audit::list))
        // Analytics
        .route("/api/analytics/metrics", get(analytics::metrics))
        .route(
            "/api/admin/analytics-overview",
            get(analytics::overview),
        )
        // Ticket workflows
        .route("/api/admin/manual-reviews", get(tickets::list_manual_reviews))
        .route(
            "/api/admin/manual-reviews/:id",
            put(tickets::update_manual_review),
        )
        .route(
            "/api/admin/support-requests",
            get(tickets::list_support_requests),
        )
        .route(
            "/api/admin/support-requests/:id",
            put(tickets::update_support_request),
        )
        // Console preferences
        .route(
            "/api/admin/preferences/:key",
            get(preferences::get_one).put(preferences::set),
        )
}
