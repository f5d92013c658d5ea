//! QR menu theme settings

use axum::{Extension, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{ThemeSettings, ThemeUpdate, is_valid_hex_color};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::db;
use crate::state::AppState;

/// GET /api/panel/theme
pub async fn get(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<ThemeSettings> {
    let tenant_id = session.tenant_id()?;

    let now = shared::util::now_millis();
    let theme = db::theme::get(&state.pool, tenant_id)
        .await
        .map_err(internal)?
        .unwrap_or_else(|| ThemeSettings::default_for(tenant_id, now));
    Ok(Json(theme))
}

/// PUT /api/panel/theme
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<ThemeUpdate>,
) -> ApiResult<ThemeSettings> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    for color in [&req.primary_color, &req.accent_color].into_iter().flatten() {
        if !is_valid_hex_color(color) {
            return Err(AppError::with_message(
                ErrorCode::ThemeInvalid,
                format!("Geçersiz renk değeri: {color}"),
            ));
        }
    }

    let now = shared::util::now_millis();
    let theme = db::theme::upsert(&state.pool, tenant_id, &req, now)
        .await
        .map_err(internal)?;
    Ok(Json(theme))
}
