//! Panel account endpoints

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::state::AppState;
use crate::{db, util};

#[derive(Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub tenant_id: Option<String>,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

/// GET /api/panel/me
pub async fn me(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<MeResponse> {
    let user = db::users::find_by_id(&state.pool, session.user_id())
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::NotAuthenticated))?;

    Ok(Json(MeResponse {
        user_id: user.id,
        tenant_id: user.tenant_id,
        email: user.email,
        display_name: user.display_name,
        role: user.role,
    }))
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// PUT /api/panel/me/password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<serde_json::Value> {
    if req.new_password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    let user = db::users::find_by_id(&state.pool, session.user_id())
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::NotAuthenticated))?;

    if !util::verify_password(&req.current_password, &user.password_hash) {
        return Err(AppError::new(ErrorCode::InvalidCredentials));
    }

    let password_hash = util::hash_password(&req.new_password)
        .map_err(|_| AppError::new(ErrorCode::InternalError))?;
    let now = shared::util::now_millis();
    db::users::update_password(&state.pool, &user.id, &password_hash, now)
        .await
        .map_err(internal)?;

    Ok(Json(serde_json::json!({"message": "Şifreniz güncellendi"})))
}
