//! Branch management

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Branch, BranchCreate, BranchUpdate};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::state::AppState;
use crate::{db, plan, util};

/// GET /api/panel/branches
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Vec<Branch>> {
    let tenant_id = session.tenant_id()?;
    let branches = db::branches::list(&state.pool, tenant_id)
        .await
        .map_err(internal)?;
    Ok(Json(branches))
}

/// POST /api/panel/branches
///
/// Creation counts against the plan's `branch_limit`.
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<BranchCreate>,
) -> ApiResult<Branch> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    if req.name.trim().is_empty() {
        return Err(AppError::validation("Şube adı boş olamaz"));
    }

    let access = plan::evaluate(&state.pool, tenant_id).await?;
    let Some(limits) = access.limits else {
        return Err(AppError::with_message(
            ErrorCode::TenantInactive,
            access
                .reason
                .unwrap_or_else(|| plan::ACCOUNT_INACTIVE_MSG.into()),
        ));
    };

    let current = db::branches::count(&state.pool, tenant_id)
        .await
        .map_err(internal)?;
    if limits.branch_limit > 0 && current >= i64::from(limits.branch_limit) {
        return Err(AppError::with_message(
            ErrorCode::PlanLimitReached,
            format!(
                "Planınız en fazla {} şubeye izin veriyor. Daha fazlası için planınızı yükseltin.",
                limits.branch_limit
            ),
        ));
    }

    let now = shared::util::now_millis();
    let branch = db::branches::create(&state.pool, &util::new_id(), tenant_id, &req, now)
        .await
        .map_err(internal)?;

    tracing::info!(tenant_id = %tenant_id, branch_id = %branch.id, "Branch created");
    Ok(Json(branch))
}

/// PUT /api/panel/branches/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(branch_id): Path<String>,
    Json(req): Json<BranchUpdate>,
) -> ApiResult<Branch> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    let now = shared::util::now_millis();
    let branch = db::branches::update(&state.pool, tenant_id, &branch_id, &req, now)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::BranchNotFound))?;
    Ok(Json(branch))
}

/// DELETE /api/panel/branches/{id}
///
/// Refused while the branch still has tables; deleting those first is an
/// explicit operator decision.
pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(branch_id): Path<String>,
) -> ApiResult<serde_json::Value> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    db::branches::find(&state.pool, tenant_id, &branch_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::BranchNotFound))?;

    let tables = db::branches::count_tables(&state.pool, &branch_id)
        .await
        .map_err(internal)?;
    if tables > 0 {
        return Err(AppError::with_message(
            ErrorCode::BranchHasTables,
            "Şubede kayıtlı masalar var. Önce masaları silin.",
        ));
    }

    db::branches::delete(&state.pool, tenant_id, &branch_id)
        .await
        .map_err(internal)?;
    Ok(Json(serde_json::json!({"message": "OK"})))
}
