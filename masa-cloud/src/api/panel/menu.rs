//! Menu category and product management

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuProduct, MenuProductCreate,
    MenuProductUpdate,
};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::state::AppState;
use crate::{db, util};

// ── Categories ──

/// GET /api/panel/menu/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Vec<MenuCategory>> {
    let tenant_id = session.tenant_id()?;
    let categories = db::menu::list_categories(&state.pool, tenant_id)
        .await
        .map_err(internal)?;
    Ok(Json(categories))
}

/// POST /api/panel/menu/categories
pub async fn create_category(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<MenuCategoryCreate>,
) -> ApiResult<MenuCategory> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    if req.name.trim().is_empty() {
        return Err(AppError::validation("Kategori adı boş olamaz"));
    }

    let now = shared::util::now_millis();
    let category = db::menu::create_category(&state.pool, &util::new_id(), tenant_id, &req, now)
        .await
        .map_err(internal)?;
    Ok(Json(category))
}

/// PUT /api/panel/menu/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(category_id): Path<String>,
    Json(req): Json<MenuCategoryUpdate>,
) -> ApiResult<MenuCategory> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    let now = shared::util::now_millis();
    let category = db::menu::update_category(&state.pool, tenant_id, &category_id, &req, now)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
    Ok(Json(category))
}

/// DELETE /api/panel/menu/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(category_id): Path<String>,
) -> ApiResult<serde_json::Value> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    db::menu::find_category(&state.pool, tenant_id, &category_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    let products = db::menu::count_category_products(&state.pool, &category_id)
        .await
        .map_err(internal)?;
    if products > 0 {
        return Err(AppError::with_message(
            ErrorCode::CategoryHasProducts,
            "Kategoride ürünler var. Önce ürünleri taşıyın veya silin.",
        ));
    }

    db::menu::delete_category(&state.pool, tenant_id, &category_id)
        .await
        .map_err(internal)?;
    Ok(Json(serde_json::json!({"message": "OK"})))
}

// ── Products ──

/// GET /api/panel/menu/products
pub async fn list_products(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Vec<MenuProduct>> {
    let tenant_id = session.tenant_id()?;
    let products = db::menu::list_products(&state.pool, tenant_id)
        .await
        .map_err(internal)?;
    Ok(Json(products))
}

/// POST /api/panel/menu/products
pub async fn create_product(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<MenuProductCreate>,
) -> ApiResult<MenuProduct> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    if req.name.trim().is_empty() {
        return Err(AppError::validation("Ürün adı boş olamaz"));
    }
    if req.price.is_sign_negative() {
        return Err(AppError::validation("Fiyat negatif olamaz"));
    }

    db::menu::find_category(&state.pool, tenant_id, &req.category_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    let now = shared::util::now_millis();
    let product = db::menu::create_product(&state.pool, &util::new_id(), tenant_id, &req, now)
        .await
        .map_err(internal)?;
    Ok(Json(product))
}

/// PUT /api/panel/menu/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(product_id): Path<String>,
    Json(req): Json<MenuProductUpdate>,
) -> ApiResult<MenuProduct> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    if req.price.is_some_and(|p| p.is_sign_negative()) {
        return Err(AppError::validation("Fiyat negatif olamaz"));
    }
    if let Some(category_id) = &req.category_id {
        db::menu::find_category(&state.pool, tenant_id, category_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
    }

    let now = shared::util::now_millis();
    let product = db::menu::update_product(&state.pool, tenant_id, &product_id, &req, now)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(product))
}

/// DELETE /api/panel/menu/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(product_id): Path<String>,
) -> ApiResult<serde_json::Value> {
    session.require_content_manager()?;
    let tenant_id = session.tenant_id()?;

    let deleted = db::menu::delete_product(&state.pool, tenant_id, &product_id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::ProductNotFound));
    }
    Ok(Json(serde_json::json!({"message": "OK"})))
}
