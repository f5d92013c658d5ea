//! Menu models (categories and products)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuCategory {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu category payload
#[derive(Debug, Clone, Deserialize)]
pub struct MenuCategoryCreate {
    pub name: String,
    pub sort_order: Option<i32>,
}

/// Update menu category payload
#[derive(Debug, Clone, Deserialize)]
pub struct MenuCategoryUpdate {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Menu product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuProduct {
    pub id: String,
    pub tenant_id: String,
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Price in TRY
    pub price: Decimal,
    pub image_url: Option<String>,
    pub sort_order: i32,
    /// Hidden from the QR menu when false
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu product payload
#[derive(Debug, Clone, Deserialize)]
pub struct MenuProductCreate {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
}

/// Update menu product payload
#[derive(Debug, Clone, Deserialize)]
pub struct MenuProductUpdate {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_available: Option<bool>,
}

/// Category with its products, as served on the public QR menu
#[derive(Debug, Clone, Serialize)]
pub struct MenuSection {
    pub category: MenuCategory,
    pub products: Vec<MenuProduct>,
}
