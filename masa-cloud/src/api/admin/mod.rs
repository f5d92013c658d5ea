//! Platform operator routes
//!
//! Every handler re-checks `require_super()`; the session middleware only
//! authenticates, it does not authorize.

pub mod plans;
pub mod tenants;
pub mod tickets;

use axum::Router;
use axum::routing::{get, patch, post, put};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Tenants
        .route("/api/admin/tenants", get(tenants::list))
        .route("/api/admin/tenants/{id}", get(tenants::detail))
        .route("/api/admin/tenants/{id}/status", patch(tenants::update_status))
        .route("/api/admin/tenants/{id}/plan", patch(tenants::update_plan))
        .route(
            "/api/admin/tenants/{id}/extend-trial",
            post(tenants::extend_trial),
        )
        // Plan catalog
        .route("/api/admin/plans", get(plans::list).post(plans::create))
        .route("/api/admin/plans/{id}", put(plans::update))
        // Support queue
        .route("/api/admin/tickets", get(tickets::list))
        .route("/api/admin/tickets/{id}", get(tickets::detail))
        .route("/api/admin/tickets/{id}/messages", post(tickets::reply))
}
