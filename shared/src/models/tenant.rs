//! Tenant model

use serde::{Deserialize, Serialize};

/// Tenant subscription/lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantStatus {
    /// Registered, inside the free trial window
    Trial,
    /// Paid subscription in good standing
    Active,
    /// Payment failed or suspended by an operator
    Suspended,
    /// Subscription canceled
    Canceled,
}

impl TenantStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "trial" => Some(Self::Trial),
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Canceled => "canceled",
        }
    }
}

/// Restaurant tenant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tenant {
    pub id: String,
    /// Restaurant display name
    pub name: String,
    /// URL-safe identifier used in public QR menu links
    pub slug: String,
    pub status: String,
    pub plan_id: Option<String>,
    /// Trial expiry (Unix millis), set at registration
    pub trial_ends_at: Option<i64>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Tenant {
    /// Typed status, `None` if the stored value is unknown
    pub fn status(&self) -> Option<TenantStatus> {
        TenantStatus::from_db(&self.status)
    }
}

/// Tenant registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct TenantRegister {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_db_roundtrip() {
        for status in [
            TenantStatus::Trial,
            TenantStatus::Active,
            TenantStatus::Suspended,
            TenantStatus::Canceled,
        ] {
            assert_eq!(TenantStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(TenantStatus::from_db("deleted"), None);
        assert_eq!(TenantStatus::from_db("TRIAL"), None);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&TenantStatus::Trial).unwrap();
        assert_eq!(json, "\"TRIAL\"");
        let status: TenantStatus = serde_json::from_str("\"SUSPENDED\"").unwrap();
        assert_eq!(status, TenantStatus::Suspended);
    }
}
