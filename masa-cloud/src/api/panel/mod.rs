//! Tenant panel routes
//!
//! All handlers run behind the session middleware and scope every query by
//! the session's tenant id.

pub mod access;
pub mod account;
pub mod billing;
pub mod branches;
pub mod campaigns;
pub mod menu;
pub mod orders;
pub mod stats;
pub mod tables;
pub mod theme;
pub mod tickets;

use axum::Router;
use axum::routing::{get, patch, post, put};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/panel/me", get(account::me))
        .route("/api/panel/me/password", put(account::change_password))
        .route("/api/panel/access", get(access::access))
        .route("/api/panel/ws", get(super::ws::panel_events))
        // Branches
        .route("/api/panel/branches", get(branches::list).post(branches::create))
        .route(
            "/api/panel/branches/{id}",
            put(branches::update).delete(branches::delete),
        )
        // Tables
        .route("/api/panel/tables", get(tables::list).post(tables::create))
        .route(
            "/api/panel/tables/{id}",
            put(tables::update).delete(tables::delete),
        )
        .route("/api/panel/tables/{id}/rotate-qr", post(tables::rotate_qr))
        // Menu
        .route(
            "/api/panel/menu/categories",
            get(menu::list_categories).post(menu::create_category),
        )
        .route(
            "/api/panel/menu/categories/{id}",
            put(menu::update_category).delete(menu::delete_category),
        )
        .route(
            "/api/panel/menu/products",
            get(menu::list_products).post(menu::create_product),
        )
        .route(
            "/api/panel/menu/products/{id}",
            put(menu::update_product).delete(menu::delete_product),
        )
        // Orders
        .route("/api/panel/orders", get(orders::list))
        .route("/api/panel/orders/export.csv", get(orders::export_csv))
        .route("/api/panel/orders/{id}", get(orders::detail))
        .route("/api/panel/orders/{id}/status", patch(orders::update_status))
        // Stats
        .route("/api/panel/stats/daily", get(stats::daily))
        .route("/api/panel/stats/summary", get(stats::summary))
        .route("/api/panel/stats/export.csv", get(stats::export_csv))
        // Tickets
        .route("/api/panel/tickets", get(tickets::list).post(tickets::create))
        .route("/api/panel/tickets/{id}", get(tickets::detail))
        .route("/api/panel/tickets/{id}/messages", post(tickets::reply))
        .route("/api/panel/tickets/{id}/close", post(tickets::close))
        // Theme
        .route("/api/panel/theme", get(theme::get).put(theme::update))
        // Campaigns
        .route(
            "/api/panel/campaigns",
            get(campaigns::list).post(campaigns::create),
        )
        .route(
            "/api/panel/campaigns/{id}",
            put(campaigns::update).delete(campaigns::delete),
        )
        // Billing
        .route("/api/panel/billing", get(billing::overview))
        .route("/api/panel/billing/checkout", post(billing::checkout))
}
