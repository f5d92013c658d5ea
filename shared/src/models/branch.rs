//! Branch model

use serde::{Deserialize, Serialize};

/// Restaurant branch entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create branch payload
#[derive(Debug, Clone, Deserialize)]
pub struct BranchCreate {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Update branch payload
#[derive(Debug, Clone, Deserialize)]
pub struct BranchUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}
