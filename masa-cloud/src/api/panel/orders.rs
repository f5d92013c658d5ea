//! Panel order handling
//!
//! Status changes validate the lifecycle transition, persist with a
//! compare-and-set, then hand the revenue side effect to the stats
//! recorder in a spawned task. The endpoint's success never depends on
//! the rollup write.

use axum::response::IntoResponse;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderDetail, OrderStatus, OrderStatusUpdate};
use shared::response::{PageQuery, PaginatedResponse};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::notify::PanelEvent;
use crate::state::AppState;
use crate::{db, export, stats};

#[derive(Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

fn parse_status_filter(raw: &str) -> Result<OrderStatus, AppError> {
    OrderStatus::ALL
        .into_iter()
        .find(|s| s.as_db().eq_ignore_ascii_case(raw))
        .ok_or_else(|| AppError::validation(format!("Geçersiz sipariş durumu: {raw}")))
}

/// Is `prev → new` a legal lifecycle move?
///
/// Forward moves may skip states (a kitchen can complete straight from
/// pending). Cancellation is allowed from every state but itself; the
/// completed → cancelled edge is the mistake-reversal path the revenue
/// recorder compensates for.
pub fn valid_transition(prev: OrderStatus, new: OrderStatus) -> bool {
    if prev == new {
        return false;
    }
    match new {
        OrderStatus::Pending => false,
        OrderStatus::Preparing => prev == OrderStatus::Pending,
        OrderStatus::Ready => matches!(prev, OrderStatus::Pending | OrderStatus::Preparing),
        OrderStatus::Completed => prev.is_open(),
        OrderStatus::Cancelled => true,
    }
}

/// GET /api/panel/orders
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<OrderListQuery>,
) -> ApiResult<PaginatedResponse<Order>> {
    let tenant_id = session.tenant_id()?;

    let status = query
        .status
        .as_deref()
        .map(parse_status_filter)
        .transpose()?;
    let status_db = status.map(|s| s.as_db());

    let paging = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };
    let (page, per_page) = paging.normalize();
    let orders = db::orders::list(
        &state.pool,
        tenant_id,
        status_db,
        i64::from(per_page),
        paging.offset(),
    )
    .await
    .map_err(internal)?;
    let total = db::orders::count(&state.pool, tenant_id, status_db)
        .await
        .map_err(internal)?;

    Ok(Json(PaginatedResponse::new(
        orders,
        page,
        per_page,
        total as u64,
    )))
}

/// GET /api/panel/orders/{id}
pub async fn detail(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(order_id): Path<String>,
) -> ApiResult<OrderDetail> {
    let tenant_id = session.tenant_id()?;

    let order = db::orders::find(&state.pool, tenant_id, &order_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    let items = db::orders::items(&state.pool, &order_id)
        .await
        .map_err(internal)?;

    Ok(Json(OrderDetail { order, items }))
}

/// PATCH /api/panel/orders/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(order_id): Path<String>,
    Json(req): Json<OrderStatusUpdate>,
) -> ApiResult<Order> {
    let tenant_id = session.tenant_id()?.to_string();

    let order = db::orders::find(&state.pool, &tenant_id, &order_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    let prev = order.status().ok_or_else(|| {
        tracing::error!(order_id = %order_id, status = %order.status, "Unknown stored order status");
        AppError::new(ErrorCode::InternalError)
    })?;
    let new = req.status;

    if !valid_transition(prev, new) {
        return Err(AppError::with_message(
            ErrorCode::OrderStatusInvalid,
            format!("Sipariş {} durumundan {} durumuna geçemez", prev.as_db(), new.as_db()),
        ));
    }

    let now = shared::util::now_millis();
    let updated = db::orders::update_status(
        &state.pool,
        &tenant_id,
        &order_id,
        prev.as_db(),
        new.as_db(),
        now,
    )
    .await
    .map_err(internal)?;
    if !updated {
        // Lost the compare-and-set: somebody moved the order meanwhile
        return Err(AppError::with_message(
            ErrorCode::OrderStatusInvalid,
            "Sipariş durumu bu sırada değişti, lütfen yenileyin",
        ));
    }

    // Revenue rollup runs after the fact and must not affect this response
    tokio::spawn(stats::record_order_transition(
        state.pool.clone(),
        tenant_id.clone(),
        order.total,
        prev,
        new,
    ));

    state.notify.publish(
        &tenant_id,
        PanelEvent::OrderStatusChanged {
            order_id: order_id.clone(),
            status: new.as_db().to_uppercase(),
        },
    );

    tracing::info!(
        tenant_id = %tenant_id,
        order_id = %order_id,
        from = prev.as_db(),
        to = new.as_db(),
        "Order status updated"
    );

    Ok(Json(Order {
        status: new.as_db().to_string(),
        updated_at: now,
        ..order
    }))
}

/// GET /api/panel/orders/export.csv
pub async fn export_csv(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    let tenant_id = session.tenant_id()?;

    let orders = db::orders::list_for_export(&state.pool, tenant_id)
        .await
        .map_err(internal)?;

    let mut body = export::csv_row(&["id", "status", "total", "note", "created_at"]);
    for order in &orders {
        body.push_str(&export::csv_row(&[
            &order.id,
            &order.status,
            &order.total.to_string(),
            order.note.as_deref().unwrap_or(""),
            &order.created_at.to_string(),
        ]));
    }

    Ok((export::csv_headers("siparisler.csv"), body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(valid_transition(OrderStatus::Pending, OrderStatus::Preparing));
        assert!(valid_transition(OrderStatus::Preparing, OrderStatus::Ready));
        assert!(valid_transition(OrderStatus::Ready, OrderStatus::Completed));
        // Skipping states is fine
        assert!(valid_transition(OrderStatus::Pending, OrderStatus::Completed));
        assert!(valid_transition(OrderStatus::Pending, OrderStatus::Ready));
    }

    #[test]
    fn test_backward_moves_rejected() {
        assert!(!valid_transition(OrderStatus::Ready, OrderStatus::Preparing));
        assert!(!valid_transition(OrderStatus::Preparing, OrderStatus::Pending));
        assert!(!valid_transition(OrderStatus::Completed, OrderStatus::Ready));
    }

    #[test]
    fn test_cancel_from_any_state_except_itself() {
        for prev in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
        ] {
            assert!(valid_transition(prev, OrderStatus::Cancelled));
        }
        assert!(!valid_transition(OrderStatus::Cancelled, OrderStatus::Cancelled));
    }

    #[test]
    fn test_cancelled_is_terminal_except_nothing() {
        for new in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
        ] {
            assert!(!valid_transition(OrderStatus::Cancelled, new));
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for status in OrderStatus::ALL {
            assert!(!valid_transition(status, status));
        }
    }
}
