//! Subscription plan model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Subscription plan entity
///
/// `features` holds operator-authored Turkish feature tags
/// (e.g. "Temel QR Menü", "Analizler & Kampanyalar").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Plan {
    pub id: String,
    pub name: String,
    /// Monthly price in TRY
    pub monthly_price: Decimal,
    pub branch_limit: i32,
    pub table_limit: i32,
    pub features: Vec<String>,
    pub is_public: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create plan payload (super admin)
#[derive(Debug, Clone, Deserialize)]
pub struct PlanCreate {
    pub name: String,
    pub monthly_price: Decimal,
    pub branch_limit: i32,
    pub table_limit: i32,
    pub features: Vec<String>,
    pub is_public: Option<bool>,
}

/// Update plan payload (super admin)
#[derive(Debug, Clone, Deserialize)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub monthly_price: Option<Decimal>,
    pub branch_limit: Option<i32>,
    pub table_limit: Option<i32>,
    pub features: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

/// Plan limits exposed to the panel after access evaluation
///
/// Built from a [`Plan`] row at the storage boundary so handlers never
/// deal with raw column values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanLimits {
    pub branch_limit: i32,
    pub table_limit: i32,
    pub features: Vec<String>,
    pub current_usage: CurrentUsage,
}

/// Per-tenant resource counts used for limit checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUsage {
    pub users: i64,
    pub categories: i64,
    pub products: i64,
}

/// Result of evaluating a tenant's panel access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantAccess {
    pub allowed: bool,
    /// Turkish denial reason shown in the panel, present when denied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Plan limits, present when allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<PlanLimits>,
}

impl TenantAccess {
    /// Access granted with the given limits
    pub fn allowed(limits: PlanLimits) -> Self {
        Self {
            allowed: true,
            reason: None,
            limits: Some(limits),
        }
    }

    /// Access denied with a user-facing reason
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            limits: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_has_no_limits() {
        let access = TenantAccess::denied("Deneme süreniz sona erdi");
        assert!(!access.allowed);
        assert_eq!(access.reason.as_deref(), Some("Deneme süreniz sona erdi"));
        assert!(access.limits.is_none());
    }

    #[test]
    fn test_allowed_serializes_without_reason() {
        let access = TenantAccess::allowed(PlanLimits {
            branch_limit: 1,
            table_limit: 10,
            features: vec!["Temel QR Menü".to_string()],
            current_usage: CurrentUsage::default(),
        });
        let json = serde_json::to_string(&access).unwrap();
        assert!(json.contains("\"allowed\":true"));
        assert!(!json.contains("reason"));
        assert!(json.contains("branch_limit"));
    }
}
