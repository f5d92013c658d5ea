//! Campaign management
//!
//! Every route is feature-gated: the plan must carry a label matching
//! "kampanya" (or be all-inclusive) before any campaign data is touched.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Campaign, CampaignCreate, CampaignUpdate};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::state::AppState;
use crate::{db, plan, util};

const FEATURE_KEYWORD: &str = "kampanya";

/// GET /api/panel/campaigns
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Vec<Campaign>> {
    let tenant_id = session.tenant_id()?;
    plan::require_feature(&state.pool, tenant_id, FEATURE_KEYWORD).await?;

    let campaigns = db::campaigns::list(&state.pool, tenant_id)
        .await
        .map_err(internal)?;
    Ok(Json(campaigns))
}

/// POST /api/panel/campaigns
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<CampaignCreate>,
) -> ApiResult<Campaign> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;
    plan::require_feature(&state.pool, tenant_id, FEATURE_KEYWORD).await?;

    if req.title.trim().is_empty() {
        return Err(AppError::validation("Kampanya başlığı boş olamaz"));
    }
    if let (Some(starts), Some(ends)) = (req.starts_at, req.ends_at)
        && starts >= ends
    {
        return Err(AppError::validation(
            "Kampanya bitişi başlangıçtan sonra olmalı",
        ));
    }

    let now = shared::util::now_millis();
    let campaign = db::campaigns::create(&state.pool, &util::new_id(), tenant_id, &req, now)
        .await
        .map_err(internal)?;
    Ok(Json(campaign))
}

/// PUT /api/panel/campaigns/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(campaign_id): Path<String>,
    Json(req): Json<CampaignUpdate>,
) -> ApiResult<Campaign> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;
    plan::require_feature(&state.pool, tenant_id, FEATURE_KEYWORD).await?;

    let now = shared::util::now_millis();
    let campaign = db::campaigns::update(&state.pool, tenant_id, &campaign_id, &req, now)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::CampaignNotFound))?;
    Ok(Json(campaign))
}

/// DELETE /api/panel/campaigns/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(campaign_id): Path<String>,
) -> ApiResult<serde_json::Value> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;
    plan::require_feature(&state.pool, tenant_id, FEATURE_KEYWORD).await?;

    let deleted = db::campaigns::delete(&state.pool, tenant_id, &campaign_id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::CampaignNotFound));
    }
    Ok(Json(serde_json::json!({"message": "OK"})))
}
