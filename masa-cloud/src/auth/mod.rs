//! Panel authentication: cookie sessions and request identity

pub mod rate_limit;
pub mod session;

use shared::error::{AppError, ErrorCode};
use shared::models::UserRole;

/// Request identity, resolved once by the session middleware.
///
/// Handlers read this from request extensions instead of probing session
/// payloads field by field.
#[derive(Debug, Clone)]
pub enum Session {
    /// Panel user bound to a tenant
    TenantUser {
        user_id: String,
        tenant_id: String,
        role: UserRole,
    },
    /// Platform operator, not bound to any tenant
    SuperAdmin { user_id: String },
}

impl Session {
    pub fn user_id(&self) -> &str {
        match self {
            Self::TenantUser { user_id, .. } | Self::SuperAdmin { user_id } => user_id,
        }
    }

    /// Tenant scope for panel routes; super admins have none.
    pub fn tenant_id(&self) -> Result<&str, AppError> {
        match self {
            Self::TenantUser { tenant_id, .. } => Ok(tenant_id),
            Self::SuperAdmin { .. } => Err(AppError::new(ErrorCode::PermissionDenied)),
        }
    }

    pub fn require_super(&self) -> Result<(), AppError> {
        match self {
            Self::SuperAdmin { .. } => Ok(()),
            Self::TenantUser { .. } => Err(AppError::new(ErrorCode::SuperAdminRequired)),
        }
    }

    /// Owner-only panel actions (billing, team management)
    pub fn require_owner(&self) -> Result<(), AppError> {
        match self {
            Self::TenantUser { role, .. } if role.can_manage_billing() => Ok(()),
            Self::SuperAdmin { .. } => Ok(()),
            _ => Err(AppError::new(ErrorCode::RoleRequired)),
        }
    }

    /// Menu/table/theme edits: staff are read-only.
    pub fn require_content_manager(&self) -> Result<(), AppError> {
        match self {
            Self::TenantUser { role, .. } if role.can_manage_content() => Ok(()),
            Self::SuperAdmin { .. } => Ok(()),
            _ => Err(AppError::new(ErrorCode::RoleRequired)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant_session(role: UserRole) -> Session {
        Session::TenantUser {
            user_id: "u-1".to_string(),
            tenant_id: "t-1".to_string(),
            role,
        }
    }

    #[test]
    fn test_tenant_scope() {
        let s = tenant_session(UserRole::Owner);
        assert_eq!(s.tenant_id().unwrap(), "t-1");
        assert!(s.require_super().is_err());

        let admin = Session::SuperAdmin {
            user_id: "a-1".to_string(),
        };
        assert!(admin.tenant_id().is_err());
        assert!(admin.require_super().is_ok());
    }

    #[test]
    fn test_role_guards() {
        assert!(tenant_session(UserRole::Owner).require_owner().is_ok());
        assert!(tenant_session(UserRole::Manager).require_owner().is_err());
        assert!(
            tenant_session(UserRole::Manager)
                .require_content_manager()
                .is_ok()
        );
        assert!(
            tenant_session(UserRole::Staff)
                .require_content_manager()
                .is_err()
        );
    }
}
