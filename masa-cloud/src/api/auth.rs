//! Authentication endpoints: login, logout, forgot-password, reset-password

use axum::{
    Extension, Json,
    extract::{Request, State},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use super::internal;
use crate::auth::Session;
use crate::auth::session::{self, SESSION_TTL_MS, clear_cookie, session_cookie};
use crate::state::AppState;
use crate::{db, util};

const RESET_PURPOSE: &str = "password_reset";
const RESET_CODE_TTL_MS: i64 = 5 * 60 * 1000;
const RESET_MAX_ATTEMPTS: i32 = 3;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    user_id: String,
    tenant_id: Option<String>,
    role: String,
    display_name: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let email = req.email.trim().to_lowercase();
    let user = db::users::find_by_email(&state.pool, &email)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials))?;

    if !util::verify_password(&req.password, &user.password_hash) {
        return Err(AppError::new(ErrorCode::InvalidCredentials));
    }
    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let token = shared::util::generate_token(43);
    let now = shared::util::now_millis();
    db::sessions::create(
        &state.pool,
        &shared::util::sha256_hex(&token),
        &user.id,
        now + SESSION_TTL_MS,
        now,
    )
    .await
    .map_err(internal)?;

    let _ = db::audit::log(
        &state.pool,
        user.tenant_id.as_deref(),
        Some(&user.id),
        "login",
        None,
        now,
    )
    .await;

    let headers = AppendHeaders([(
        http::header::SET_COOKIE,
        session_cookie(&token, SESSION_TTL_MS / 1000),
    )]);
    let body = Json(LoginResponse {
        user_id: user.id,
        tenant_id: user.tenant_id,
        role: user.role,
        display_name: user.display_name,
    });
    Ok((headers, body).into_response())
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    request: Request,
) -> Result<Response, AppError> {
    // Delete the specific session row for this cookie
    if let Some(token) = request
        .headers()
        .get(http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| session::cookie_value(h, session::SESSION_COOKIE))
    {
        let _ = db::sessions::delete(&state.pool, &shared::util::sha256_hex(token)).await;
    }

    tracing::debug!(user_id = %session.user_id(), "Panel logout");

    let headers = AppendHeaders([(http::header::SET_COOKIE, clear_cookie())]);
    Ok((headers, Json(serde_json::json!({"message": "OK"}))).into_response())
}

// ── Password reset ──

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> super::ApiResult<serde_json::Value> {
    let email = req.email.trim().to_lowercase();
    // Always the same response, to prevent email enumeration
    let neutral = serde_json::json!({
        "message": "E-posta kayıtlıysa bir sıfırlama kodu gönderildi"
    });

    let Ok(Some(_user)) = db::users::find_by_email(&state.pool, &email).await else {
        return Ok(Json(neutral));
    };

    let code = util::generate_code();
    let code_hash =
        util::hash_password(&code).map_err(|_| AppError::new(ErrorCode::InternalError))?;
    let now = shared::util::now_millis();

    let _ = db::password_resets::upsert(
        &state.pool,
        &email,
        RESET_PURPOSE,
        &code_hash,
        now + RESET_CODE_TTL_MS,
        now,
    )
    .await;

    let email_sender = state.email.clone();
    tokio::spawn(async move {
        if let Err(e) = email_sender.send_password_reset_code(&email, &code).await {
            tracing::warn!("Password reset email failed: {e}");
        }
    });

    Ok(Json(neutral))
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> super::ApiResult<serde_json::Value> {
    let email = req.email.trim().to_lowercase();

    if req.new_password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    let record = db::password_resets::find(&state.pool, &email, RESET_PURPOSE)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ResetTokenInvalid))?;

    let now = shared::util::now_millis();
    if now > record.expires_at {
        return Err(AppError::new(ErrorCode::ResetTokenExpired));
    }
    if record.attempts >= RESET_MAX_ATTEMPTS {
        return Err(AppError::new(ErrorCode::ResetTokenInvalid));
    }

    db::password_resets::increment_attempts(&state.pool, &email, RESET_PURPOSE)
        .await
        .map_err(internal)?;

    if !util::verify_password(&req.code, &record.code_hash) {
        return Err(AppError::new(ErrorCode::ResetTokenInvalid));
    }

    let password_hash = util::hash_password(&req.new_password)
        .map_err(|_| AppError::new(ErrorCode::InternalError))?;
    let updated = db::users::update_password_by_email(&state.pool, &email, &password_hash, now)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(AppError::new(ErrorCode::ResetTokenInvalid));
    }

    // Invalidate the code and any open sessions of the user
    let _ = db::password_resets::delete(&state.pool, &email, RESET_PURPOSE).await;
    if let Ok(Some(user)) = db::users::find_by_email(&state.pool, &email).await {
        let _ = db::sessions::delete_for_user(&state.pool, &user.id).await;
    }

    Ok(Json(serde_json::json!({"message": "Şifreniz güncellendi"})))
}
