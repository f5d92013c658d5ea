//! Dining table model

use serde::{Deserialize, Serialize};

/// Dining table entity
///
/// `qr_token` is the opaque value embedded in the printed QR code.
/// Rotating it invalidates previously printed codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: String,
    pub tenant_id: String,
    pub branch_id: String,
    pub name: String,
    pub qr_token: String,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Deserialize)]
pub struct DiningTableCreate {
    pub branch_id: String,
    pub name: String,
    pub capacity: Option<i32>,
}

/// Update dining table payload
#[derive(Debug, Clone, Deserialize)]
pub struct DiningTableUpdate {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}
