//! Session cookie middleware
//!
//! The cookie carries an opaque random token; only its SHA-256 hash is
//! stored in `panel_sessions`. The middleware resolves the cookie into a
//! [`Session`] once per request and inserts it into request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};
use shared::models::UserRole;

use super::Session;
use crate::db;
use crate::state::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "masa_session";

/// Session lifetime: 7 days
pub const SESSION_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Extract the named cookie from a `Cookie` header value.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then_some(v)
    })
}

/// `Set-Cookie` value for a fresh session token.
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    )
}

/// `Set-Cookie` value that clears the session cookie.
pub fn clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Middleware: resolve the session cookie or reject with 401.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = request
        .headers()
        .get(http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| cookie_value(h, SESSION_COOKIE))
        .ok_or_else(|| AppError::new(ErrorCode::NotAuthenticated).into_response())?;

    let session = resolve(&state, token)
        .await
        .map_err(|e| e.into_response())?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Look up the token hash and build the request identity.
async fn resolve(state: &AppState, token: &str) -> Result<Session, AppError> {
    let token_hash = shared::util::sha256_hex(token);
    let now = shared::util::now_millis();

    let row = db::sessions::find_user_by_token_hash(&state.pool, &token_hash)
        .await
        .map_err(|e| {
            tracing::error!("Session lookup failed: {e}");
            AppError::new(ErrorCode::DatabaseError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::NotAuthenticated))?;

    if row.expires_at <= now {
        // Lazy cleanup; the periodic sweep handles the rest
        let _ = db::sessions::delete(&state.pool, &token_hash).await;
        return Err(AppError::new(ErrorCode::SessionExpired));
    }
    if !row.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let role = UserRole::from_db(&row.role).ok_or_else(|| {
        tracing::error!(user_id = %row.user_id, role = %row.role, "Unknown role in panel_users");
        AppError::new(ErrorCode::InternalError)
    })?;

    match (row.tenant_id, role) {
        (None, UserRole::SuperAdmin) => Ok(Session::SuperAdmin {
            user_id: row.user_id,
        }),
        (Some(tenant_id), role) if role != UserRole::SuperAdmin => Ok(Session::TenantUser {
            user_id: row.user_id,
            tenant_id,
            role,
        }),
        // tenant_id and role disagree; treat as unauthenticated
        _ => {
            tracing::error!(user_id = %row.user_id, "Inconsistent tenant/role pairing");
            Err(AppError::new(ErrorCode::NotAuthenticated))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_extraction() {
        let header = "theme=dark; masa_session=abc123; lang=tr";
        assert_eq!(cookie_value(header, SESSION_COOKIE), Some("abc123"));
        assert_eq!(cookie_value(header, "lang"), Some("tr"));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn test_cookie_value_ignores_partial_names() {
        let header = "xmasa_session=evil; masa_session=good";
        assert_eq!(cookie_value(header, SESSION_COOKIE), Some("good"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let c = session_cookie("tok", 3600);
        assert!(c.contains("masa_session=tok"));
        assert!(c.contains("HttpOnly"));
        assert!(c.contains("Max-Age=3600"));

        let cleared = clear_cookie();
        assert!(cleared.contains("Max-Age=0"));
    }
}
