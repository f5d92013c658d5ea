//! Panel access verdict
//!
//! The panel calls this on load and after 403s to decide whether to show
//! the lock screen (expired trial, suspended account) and which limits to
//! display.

use axum::{Extension, Json, extract::State};
use shared::models::TenantAccess;

use crate::api::ApiResult;
use crate::auth::Session;
use crate::plan;
use crate::state::AppState;

/// GET /api/panel/access
pub async fn access(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<TenantAccess> {
    let tenant_id = session.tenant_id()?;
    let access = plan::evaluate(&state.pool, tenant_id).await?;
    Ok(Json(access))
}
