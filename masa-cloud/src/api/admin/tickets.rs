//! Super-admin support queue

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{SupportTicket, TicketDetail, TicketMessage, TicketReply, TicketStatus};
use shared::response::{PageQuery, PaginatedResponse};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::notify::PanelEvent;
use crate::state::AppState;
use crate::db;

#[derive(Deserialize)]
pub struct TicketQueueQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /api/admin/tickets?status=
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<TicketQueueQuery>,
) -> ApiResult<PaginatedResponse<SupportTicket>> {
    session.require_super()?;

    let status = query
        .status
        .as_deref()
        .map(|raw| {
            TicketStatus::from_db(&raw.to_lowercase())
                .ok_or_else(|| AppError::validation(format!("Geçersiz durum: {raw}")))
        })
        .transpose()?;
    let status_db = status.map(|s| s.as_db());

    let paging = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };
    let (page, per_page) = paging.normalize();
    let tickets = db::tickets::list_all(&state.pool, status_db, i64::from(per_page), paging.offset())
        .await
        .map_err(internal)?;

    let total = db::tickets::count_all(&state.pool, status_db)
        .await
        .map_err(internal)?;

    Ok(Json(PaginatedResponse::new(
        tickets,
        page,
        per_page,
        total as u64,
    )))
}

/// GET /api/admin/tickets/{id}
pub async fn detail(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(ticket_id): Path<String>,
) -> ApiResult<TicketDetail> {
    session.require_super()?;

    let ticket = db::tickets::find_any(&state.pool, &ticket_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TicketNotFound))?;
    let messages = db::tickets::messages(&state.pool, &ticket_id)
        .await
        .map_err(internal)?;

    Ok(Json(TicketDetail { ticket, messages }))
}

/// POST /api/admin/tickets/{id}/messages
///
/// Marks the ticket answered, notifies the tenant's open panels and emails
/// the opener best-effort.
pub async fn reply(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(ticket_id): Path<String>,
    Json(req): Json<TicketReply>,
) -> ApiResult<TicketMessage> {
    session.require_super()?;

    if req.body.trim().is_empty() {
        return Err(AppError::validation("Mesaj boş olamaz"));
    }

    let ticket = db::tickets::find_any(&state.pool, &ticket_id)
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
        true,
        &req.body,
        TicketStatus::Answered.as_db(),
        now,
    )
    .await
    .map_err(internal)?;

    state.notify.publish(
        &ticket.tenant_id,
        PanelEvent::TicketReplied {
            ticket_id: ticket_id.clone(),
        },
    );

    // Email the opener, best-effort
    if let Ok(Some(opener)) = db::users::find_by_id(&state.pool, &ticket.opened_by).await {
        let email = state.email.clone();
        let subject = ticket.subject.clone();
        tokio::spawn(async move {
            if let Err(e) = email.send_ticket_reply_notice(&opener.email, &subject).await {
                tracing::warn!("Ticket reply email failed: {e}");
            }
        });
    }

    tracing::info!(ticket_id = %ticket_id, tenant_id = %ticket.tenant_id, "Admin replied to ticket");
    Ok(Json(message))
}
