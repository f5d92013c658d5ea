//! Dining table management
//!
//! Each table carries an opaque `qr_token`; printed QR codes embed
//! `{qr_base_url}/{qr_token}`. Rotating the token invalidates every
//! previously printed code for that table.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::state::AppState;
use crate::{db, plan, util};

const QR_TOKEN_LEN: usize = 22;

#[derive(Serialize)]
pub struct TableWithUrl {
    #[serde(flatten)]
    pub table: DiningTable,
    /// Full URL encoded in the printed QR code
    pub qr_url: String,
}

fn with_url(table: DiningTable, qr_base_url: &str) -> TableWithUrl {
    let qr_url = format!("{}/{}", qr_base_url.trim_end_matches('/'), table.qr_token);
    TableWithUrl { table, qr_url }
}

/// GET /api/panel/tables
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Vec<TableWithUrl>> {
    let tenant_id = session.tenant_id()?;
    let tables = db::tables::list(&state.pool, tenant_id)
        .await
        .map_err(internal)?;
    Ok(Json(
        tables
            .into_iter()
            .map(|t| with_url(t, &state.config.qr_base_url))
            .collect(),
    ))
}

/// POST /api/panel/tables
///
/// Creation counts against the plan's `table_limit`.
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<DiningTableCreate>,
) -> ApiResult<TableWithUrl> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    if req.name.trim().is_empty() {
        return Err(AppError::validation("Masa adı boş olamaz"));
    }

    db::branches::find(&state.pool, tenant_id, &req.branch_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::BranchNotFound))?;

    let access = plan::evaluate(&state.pool, tenant_id).await?;
    let Some(limits) = access.limits else {
        return Err(AppError::with_message(
            ErrorCode::TenantInactive,
            access
                .reason
                .unwrap_or_else(|| plan::ACCOUNT_INACTIVE_MSG.into()),
        ));
    };

    let current = db::tables::count(&state.pool, tenant_id)
        .await
        .map_err(internal)?;
    if limits.table_limit > 0 && current >= i64::from(limits.table_limit) {
        return Err(AppError::with_message(
            ErrorCode::PlanLimitReached,
            format!(
                "Planınız en fazla {} masaya izin veriyor. Daha fazlası için planınızı yükseltin.",
                limits.table_limit
            ),
        ));
    }

    let now = shared::util::now_millis();
    let qr_token = shared::util::generate_token(QR_TOKEN_LEN);
    let table = db::tables::create(&state.pool, &util::new_id(), tenant_id, &qr_token, &req, now)
        .await
        .map_err(internal)?;

    tracing::info!(tenant_id = %tenant_id, table_id = %table.id, "Table created");
    Ok(Json(with_url(table, &state.config.qr_base_url)))
}

/// PUT /api/panel/tables/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(table_id): Path<String>,
    Json(req): Json<DiningTableUpdate>,
) -> ApiResult<TableWithUrl> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    let now = shared::util::now_millis();
    let table = db::tables::update(&state.pool, tenant_id, &table_id, &req, now)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    Ok(Json(with_url(table, &state.config.qr_base_url)))
}

/// POST /api/panel/tables/{id}/rotate-qr
pub async fn rotate_qr(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(table_id): Path<String>,
) -> ApiResult<TableWithUrl> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    let now = shared::util::now_millis();
    let qr_token = shared::util::generate_token(QR_TOKEN_LEN);
    let table = db::tables::rotate_qr_token(&state.pool, tenant_id, &table_id, &qr_token, now)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

    tracing::info!(tenant_id = %tenant_id, table_id = %table_id, "QR token rotated");
    Ok(Json(with_url(table, &state.config.qr_base_url)))
}

/// DELETE /api/panel/tables/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(table_id): Path<String>,
) -> ApiResult<serde_json::Value> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    let deleted = db::tables::delete(&state.pool, tenant_id, &table_id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::TableNotFound));
    }
    Ok(Json(serde_json::json!({"message": "OK"})))
}
