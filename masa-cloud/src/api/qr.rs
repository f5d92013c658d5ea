//! Public QR menu and guest ordering
//!
//! No session: the table's QR token is the only credential. Every route
//! passes through the plan evaluator first, so an expired trial or a
//! suspended account takes the public menu offline immediately.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Campaign, MenuSection, Order, OrderPlace, TenantAccess, ThemeSettings,
};

use super::{ApiResult, internal};
use crate::db::orders::NewOrderItem;
use crate::notify::PanelEvent;
use crate::state::AppState;
use crate::{db, plan, util};

const MAX_ITEMS_PER_ORDER: usize = 50;
const MAX_QUANTITY_PER_LINE: i32 = 20;

#[derive(Serialize)]
pub struct PublicMenu {
    pub restaurant_name: String,
    pub table_name: String,
    pub theme: ThemeSettings,
    pub sections: Vec<MenuSection>,
    /// Present only when the plan carries the campaign feature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaigns: Option<Vec<Campaign>>,
}

/// Resolve QR token → table → tenant, then gate on the evaluator.
async fn resolve_gate(
    state: &AppState,
    qr_token: &str,
) -> Result<(shared::models::DiningTable, shared::models::Tenant, TenantAccess), AppError> {
    let table = db::tables::find_by_qr_token(&state.pool, qr_token)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::QrTokenInvalid))?;

    let tenant = db::tenants::find_by_id(&state.pool, &table.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;

    let access = plan::evaluate(&state.pool, &tenant.id).await?;
    if !access.allowed {
        return Err(AppError::with_message(
            ErrorCode::TenantInactive,
            access
                .reason
                .unwrap_or_else(|| plan::ACCOUNT_INACTIVE_MSG.into()),
        ));
    }

    Ok((table, tenant, access))
}

/// GET /qr/{qr_token}/menu
pub async fn get_menu(
    State(state): State<AppState>,
    Path(qr_token): Path<String>,
) -> ApiResult<PublicMenu> {
    let (table, tenant, access) = resolve_gate(&state, &qr_token).await?;

    let now = shared::util::now_millis();
    let theme = db::theme::get(&state.pool, &tenant.id)
        .await
        .map_err(internal)?
        .unwrap_or_else(|| ThemeSettings::default_for(&tenant.id, now));

    let sections = db::menu::public_menu(&state.pool, &tenant.id)
        .await
        .map_err(internal)?;

    let campaigns = if plan::has_feature(access.limits.as_ref(), "kampanya") {
        Some(
            db::campaigns::list_visible(&state.pool, &tenant.id, now)
                .await
                .map_err(internal)?,
        )
    } else {
        None
    };

    Ok(Json(PublicMenu {
        restaurant_name: tenant.name,
        table_name: table.name,
        theme,
        sections,
        campaigns,
    }))
}

/// POST /qr/{qr_token}/orders
///
/// The total is computed server-side from current product prices; any
/// client-sent amount is ignored.
pub async fn place_order(
    State(state): State<AppState>,
    Path(qr_token): Path<String>,
    Json(req): Json<OrderPlace>,
) -> ApiResult<Order> {
    let (table, tenant, _access) = resolve_gate(&state, &qr_token).await?;

    if req.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    if req.items.len() > MAX_ITEMS_PER_ORDER {
        return Err(AppError::validation("Siparişteki ürün sayısı çok fazla"));
    }
    for item in &req.items {
        if item.quantity < 1 || item.quantity > MAX_QUANTITY_PER_LINE {
            return Err(AppError::validation("Geçersiz ürün adedi"));
        }
    }

    let product_ids: Vec<String> = req.items.iter().map(|i| i.product_id.clone()).collect();
    let products = db::menu::find_available_products(&state.pool, &tenant.id, &product_ids)
        .await
        .map_err(internal)?;

    let mut total = Decimal::ZERO;
    let mut items = Vec::with_capacity(req.items.len());
    for input in &req.items {
        let product = products
            .iter()
            .find(|p| p.id == input.product_id)
            .ok_or_else(|| AppError::new(ErrorCode::ProductUnavailable))?;
        let line_total = product.price * Decimal::from(input.quantity);
        total += line_total;
        items.push(NewOrderItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity: input.quantity,
            line_total,
        });
    }

    let now = shared::util::now_millis();
    let order = db::orders::create_with_items(
        &state.pool,
        &util::new_id(),
        &tenant.id,
        &table.branch_id,
        &table.id,
        total,
        req.note.as_deref(),
        &items,
        now,
    )
    .await
    .map_err(internal)?;

    state.notify.publish(
        &tenant.id,
        PanelEvent::OrderPlaced {
            order_id: order.id.clone(),
            table_name: table.name.clone(),
            total: total.to_string(),
        },
    );

    tracing::info!(tenant_id = %tenant.id, order_id = %order.id, %total, "QR order placed");

    Ok(Json(order))
}
