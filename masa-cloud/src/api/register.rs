//! Tenant self-signup

use axum::{Json, extract::State};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{TenantRegister, UserRole};

use super::{ApiResult, internal};
use crate::state::AppState;
use crate::{db, util};

/// Default plan assigned at signup, replaced at first checkout
const TRIAL_PLAN_ID: &str = "baslangic";

#[derive(Serialize)]
pub struct RegisterResponse {
    pub tenant_id: String,
    pub slug: String,
    pub trial_ends_at: i64,
}

/// POST /api/register
///
/// Creates the tenant (status `trial`), its owner panel user and a default
/// theme row. The caller logs in separately.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<TenantRegister>,
) -> ApiResult<RegisterResponse> {
    let name = req.name.trim();
    let email = req.email.trim().to_lowercase();

    if name.is_empty() {
        return Err(AppError::validation("İşletme adı boş olamaz"));
    }
    if !email.contains('@') {
        return Err(AppError::validation("Geçerli bir e-posta adresi girin"));
    }
    if req.password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    if db::users::find_by_email(&state.pool, &email)
        .await
        .map_err(internal)?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::EmailTaken));
    }

    let password_hash =
        util::hash_password(&req.password).map_err(|_| AppError::new(ErrorCode::InternalError))?;

    let now = shared::util::now_millis();
    let tenant_id = util::new_id();
    let slug = util::slugify(name);
    let trial_ends_at = now + state.config.trial_days * 86_400_000;

    db::tenants::create(
        &state.pool,
        &tenant_id,
        name,
        &slug,
        &email,
        req.phone.as_deref(),
        TRIAL_PLAN_ID,
        trial_ends_at,
        now,
    )
    .await
    .map_err(internal)?;

    db::users::create(
        &state.pool,
        &util::new_id(),
        Some(&tenant_id),
        &email,
        &password_hash,
        name,
        UserRole::Owner.as_db(),
        now,
    )
    .await
    .map_err(internal)?;

    let _ = db::theme::create_default(&state.pool, &tenant_id, now).await;
    let _ = db::audit::log(&state.pool, Some(&tenant_id), None, "register", None, now).await;

    tracing::info!(tenant_id = %tenant_id, slug = %slug, "Tenant registered");

    Ok(Json(RegisterResponse {
        tenant_id,
        slug,
        trial_ends_at,
    }))
}
