//! API routes for masa-cloud

pub mod admin;
pub mod auth;
pub mod health;
pub mod panel;
pub mod qr;
pub mod register;
pub mod webhook;
pub mod ws;

use axum::routing::{get, post};
use axum::{Router, middleware};
use shared::error::{AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::rate_limit;
use crate::auth::session::session_middleware;
use crate::state::AppState;

/// Handler result: JSON payload or an error envelope
pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Map an unexpected storage error: log it, hide the detail.
pub fn internal(e: sqlx::Error) -> AppError {
    tracing::error!("Database error: {e}");
    AppError::new(ErrorCode::DatabaseError)
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Public auth routes, rate-limited per IP
    let login = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::login_rate_limit,
        ));

    let registration = Router::new()
        .route("/api/register", post(register::register))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::register_rate_limit,
        ));

    // Public QR menu; order placement carries its own limiter
    let qr_order = Router::new()
        .route("/qr/{qr_token}/orders", post(qr::place_order))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::qr_order_rate_limit,
        ));
    let qr = Router::new()
        .route("/qr/{qr_token}/menu", get(qr::get_menu))
        .merge(qr_order);

    // Payment provider webhook (signature-verified, raw body)
    let webhook = Router::new().route("/webhooks/payment", post(webhook::handle_webhook));

    // Session-authenticated surface: tenant panel + super admin
    let authed = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .merge(panel::router())
        .merge(admin::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(login)
        .merge(registration)
        .merge(qr)
        .merge(webhook)
        .merge(authed)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
