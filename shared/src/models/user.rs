//! Panel user model

use serde::{Deserialize, Serialize};

/// Role of a panel user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Tenant owner, full control of the tenant
    Owner,
    /// Tenant manager, everything except billing
    Manager,
    /// Tenant staff, order handling only
    Staff,
    /// Platform operator, not bound to a tenant
    SuperAdmin,
}

impl UserRole {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(Self::Owner),
            "manager" => Some(Self::Manager),
            "staff" => Some(Self::Staff),
            "super_admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::Staff => "staff",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Can this role manage billing and plan changes?
    pub fn can_manage_billing(&self) -> bool {
        matches!(self, Self::Owner | Self::SuperAdmin)
    }

    /// Can this role edit menu, tables and settings?
    pub fn can_manage_content(&self) -> bool {
        matches!(self, Self::Owner | Self::Manager | Self::SuperAdmin)
    }
}

/// Panel user entity
///
/// `tenant_id` is NULL for super admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PanelUser {
    pub id: String,
    pub tenant_id: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PanelUser {
    /// Typed role, `None` if the stored value is unknown
    pub fn role(&self) -> Option<UserRole> {
        UserRole::from_db(&self.role)
    }
}

/// Create panel user payload
#[derive(Debug, Clone, Deserialize)]
pub struct PanelUserCreate {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_db_roundtrip() {
        for role in [
            UserRole::Owner,
            UserRole::Manager,
            UserRole::Staff,
            UserRole::SuperAdmin,
        ] {
            assert_eq!(UserRole::from_db(role.as_db()), Some(role));
        }
        assert_eq!(UserRole::from_db("admin"), None);
    }

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::Owner.can_manage_billing());
        assert!(!UserRole::Manager.can_manage_billing());
        assert!(UserRole::Manager.can_manage_content());
        assert!(!UserRole::Staff.can_manage_content());
        assert!(UserRole::SuperAdmin.can_manage_billing());
    }
}
