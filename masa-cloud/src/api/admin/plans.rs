//! Plan catalog administration
//!
//! Plans are never deleted: a plan with subscribed tenants is load-bearing,
//! and an empty one can simply be made non-public.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{Plan, PlanCreate, PlanUpdate};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::db;
use crate::state::AppState;

/// GET /api/admin/plans
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Vec<Plan>> {
    session.require_super()?;
    let plans = db::plans::list(&state.pool, false)
        .await
        .map_err(internal)?;
    Ok(Json(plans))
}

/// POST /api/admin/plans
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<PlanCreate>,
) -> ApiResult<Plan> {
    session.require_super()?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Plan adı boş olamaz"));
    }
    if req.monthly_price < Decimal::ZERO {
        return Err(AppError::validation("Plan fiyatı negatif olamaz"));
    }

    let id = crate::util::slugify(name);
    let now = shared::util::now_millis();
    db::plans::create(
        &state.pool,
        &id,
        name,
        req.monthly_price,
        req.branch_limit,
        req.table_limit,
        &req.features,
        req.is_public.unwrap_or(true),
        now,
    )
    .await
    .map_err(internal)?;

    let plan = db::plans::find(&state.pool, &id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::InternalError))?;

    tracing::info!(plan_id = %id, "Plan created");
    Ok(Json(plan))
}

/// PUT /api/admin/plans/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(plan_id): Path<String>,
    Json(req): Json<PlanUpdate>,
) -> ApiResult<Plan> {
    session.require_super()?;

    if req.monthly_price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::validation("Plan fiyatı negatif olamaz"));
    }

    // Shrinking limits under subscribed tenants would strand their data
    if req.branch_limit.is_some() || req.table_limit.is_some() {
        let subscribed = db::plans::count_subscribed_tenants(&state.pool, &plan_id)
            .await
            .map_err(internal)?;
        if subscribed > 0 {
            return Err(AppError::with_message(
                ErrorCode::PlanInUse,
                format!("Planı {subscribed} kiracı kullanıyor; limitler değiştirilemez"),
            ));
        }
    }

    let now = shared::util::now_millis();
    let updated = db::plans::update(
        &state.pool,
        &plan_id,
        req.name.as_deref(),
        req.monthly_price,
        req.branch_limit,
        req.table_limit,
        req.features.as_deref(),
        req.is_public,
        now,
    )
    .await
    .map_err(internal)?;
    if !updated {
        return Err(AppError::new(ErrorCode::PlanNotFound));
    }

    let plan = db::plans::find(&state.pool, &plan_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::InternalError))?;
    Ok(Json(plan))
}
