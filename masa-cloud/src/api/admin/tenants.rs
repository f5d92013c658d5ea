//! Super-admin tenant operations

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{Tenant, TenantAccess, TenantStatus};
use shared::response::{PageQuery, PaginatedResponse};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::state::AppState;
use crate::{db, plan};

#[derive(Deserialize)]
pub struct TenantListQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

fn parse_status(raw: &str) -> Result<TenantStatus, AppError> {
    TenantStatus::from_db(&raw.to_lowercase())
        .ok_or_else(|| AppError::validation(format!("Geçersiz durum: {raw}")))
}

/// GET /api/admin/tenants?status=
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<TenantListQuery>,
) -> ApiResult<PaginatedResponse<Tenant>> {
    session.require_super()?;

    let status = query.status.as_deref().map(parse_status).transpose()?;
    let status_db = status.map(|s| s.as_db());

    let paging = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };
    let (page, per_page) = paging.normalize();
    let tenants = db::tenants::list(&state.pool, status_db, i64::from(per_page), paging.offset())
        .await
        .map_err(internal)?;
    let total = db::tenants::count(&state.pool, status_db)
        .await
        .map_err(internal)?;

    Ok(Json(PaginatedResponse::new(
        tenants,
        page,
        per_page,
        total as u64,
    )))
}

#[derive(Serialize)]
pub struct TenantDetail {
    #[serde(flatten)]
    pub tenant: Tenant,
    /// Live evaluator verdict, as the panel would see it
    pub access: TenantAccess,
}

/// GET /api/admin/tenants/{id}
pub async fn detail(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(tenant_id): Path<String>,
) -> ApiResult<TenantDetail> {
    session.require_super()?;

    let tenant = db::tenants::find_by_id(&state.pool, &tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;
    let access = plan::evaluate(&state.pool, &tenant_id).await?;

    Ok(Json(TenantDetail { tenant, access }))
}

#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: TenantStatus,
}

/// PATCH /api/admin/tenants/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(tenant_id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> ApiResult<serde_json::Value> {
    session.require_super()?;

    let now = shared::util::now_millis();
    let updated = db::tenants::update_status(&state.pool, &tenant_id, req.status.as_db(), now)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(AppError::new(ErrorCode::TenantNotFound));
    }

    let _ = db::audit::log(
        &state.pool,
        Some(&tenant_id),
        Some(session.user_id()),
        "admin_status_change",
        Some(serde_json::json!({"status": req.status.as_db()})),
        now,
    )
    .await;

    tracing::info!(tenant_id = %tenant_id, status = req.status.as_db(), "Tenant status set by admin");
    Ok(Json(serde_json::json!({"message": "OK"})))
}

#[derive(Deserialize)]
pub struct PlanChangeRequest {
    pub plan_id: String,
}

/// PATCH /api/admin/tenants/{id}/plan
pub async fn update_plan(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(tenant_id): Path<String>,
    Json(req): Json<PlanChangeRequest>,
) -> ApiResult<serde_json::Value> {
    session.require_super()?;

    db::plans::find(&state.pool, &req.plan_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::PlanNotFound))?;

    let now = shared::util::now_millis();
    let updated = db::tenants::set_plan(&state.pool, &tenant_id, &req.plan_id, now)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(AppError::new(ErrorCode::TenantNotFound));
    }

    let _ = db::audit::log(
        &state.pool,
        Some(&tenant_id),
        Some(session.user_id()),
        "admin_plan_change",
        Some(serde_json::json!({"plan_id": req.plan_id})),
        now,
    )
    .await;

    Ok(Json(serde_json::json!({"message": "OK"})))
}

#[derive(Deserialize)]
pub struct ExtendTrialRequest {
    pub days: i64,
}

#[derive(Serialize)]
pub struct ExtendTrialResponse {
    pub trial_ends_at: i64,
}

/// POST /api/admin/tenants/{id}/extend-trial
pub async fn extend_trial(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(tenant_id): Path<String>,
    Json(req): Json<ExtendTrialRequest>,
) -> ApiResult<ExtendTrialResponse> {
    session.require_super()?;

    if req.days < 1 || req.days > 365 {
        return Err(AppError::validation("Uzatma 1 ile 365 gün arasında olmalı"));
    }

    let now = shared::util::now_millis();
    let trial_ends_at = db::tenants::extend_trial(&state.pool, &tenant_id, req.days, now)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;

    let _ = db::audit::log(
        &state.pool,
        Some(&tenant_id),
        Some(session.user_id()),
        "admin_trial_extended",
        Some(serde_json::json!({"days": req.days, "trial_ends_at": trial_ends_at})),
        now,
    )
    .await;

    tracing::info!(tenant_id = %tenant_id, days = req.days, "Trial extended by admin");
    Ok(Json(ExtendTrialResponse { trial_ends_at }))
}
