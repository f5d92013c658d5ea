//! Tenant-side support tickets

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{SupportTicket, TicketCreate, TicketDetail, TicketReply, TicketStatus};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::state::AppState;
use crate::{db, util};

/// GET /api/panel/tickets
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Vec<SupportTicket>> {
    let tenant_id = session.tenant_id()?;
    let tickets = db::tickets::list_for_tenant(&state.pool, tenant_id)
        .await
        .map_err(internal)?;
    Ok(Json(tickets))
}

/// POST /api/panel/tickets
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<TicketCreate>,
) -> ApiResult<SupportTicket> {
    let tenant_id = session.tenant_id()?;

    if req.subject.trim().is_empty() || req.body.trim().is_empty() {
        return Err(AppError::validation("Konu ve mesaj boş olamaz"));
    }

    let now = shared::util::now_millis();
    let ticket = db::tickets::create_with_message(
        &state.pool,
        &util::new_id(),
        tenant_id,
        session.user_id(),
        req.subject.trim(),
        &req.body,
        now,
    )
    .await
    .map_err(internal)?;

    tracing::info!(tenant_id = %tenant_id, ticket_id = %ticket.id, "Ticket opened");
    Ok(Json(ticket))
}

/// GET /api/panel/tickets/{id}
pub async fn detail(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(ticket_id): Path<String>,
) -> ApiResult<TicketDetail> {
    let tenant_id = session.tenant_id()?;

    let ticket = db::tickets::find(&state.pool, tenant_id, &ticket_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TicketNotFound))?;
    let messages = db::tickets::messages(&state.pool, &ticket_id)
        .await
        .map_err(internal)?;

    Ok(Json(TicketDetail { ticket, messages }))
}

/// POST /api/panel/tickets/{id}/messages
///
/// A tenant reply reopens an answered ticket; closed tickets stay closed.
pub async fn reply(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(ticket_id): Path<String>,
    Json(req): Json<TicketReply>,
) -> ApiResult<shared::models::TicketMessage> {
    let tenant_id = session.tenant_id()?;

    if req.body.trim().is_empty() {
        return Err(AppError::validation("Mesaj boş olamaz"));
    }

    let ticket = db::tickets::find(&state.pool, tenant_id, &ticket_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TicketNotFound))?;
    if TicketStatus::from_db(&ticket.status) == Some(TicketStatus::Closed) {
        return Err(AppError::new(ErrorCode::TicketClosed));
    }

    let now = shared::util::now_millis();
    let message = db::tickets::add_message(
        &state.pool,
        &ticket_id,
        session.user_id(),
        false,
        &req.body,
        TicketStatus::Open.as_db(),
        now,
    )
    .await
    .map_err(internal)?;

    Ok(Json(message))
}

/// POST /api/panel/tickets/{id}/close
pub async fn close(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(ticket_id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let tenant_id = session.tenant_id()?;

    db::tickets::find(&state.pool, tenant_id, &ticket_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TicketNotFound))?;

    let now = shared::util::now_millis();
    db::tickets::set_status(&state.pool, &ticket_id, TicketStatus::Closed.as_db(), now)
        .await
        .map_err(internal)?;

    Ok(Json(serde_json::json!({"message": "OK"})))
}
