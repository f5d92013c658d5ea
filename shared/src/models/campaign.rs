//! Campaign model

use serde::{Deserialize, Serialize};

/// Promotional campaign shown on the QR menu
///
/// Available only to tenants whose plan carries a campaign feature tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Campaign {
    pub id: String,
    pub tenant_id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Visibility window (Unix millis), open-ended when NULL
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Campaign {
    /// Visible on the public menu at the given time?
    pub fn is_visible_at(&self, now: i64) -> bool {
        self.is_active
            && self.starts_at.is_none_or(|s| s <= now)
            && self.ends_at.is_none_or(|e| now < e)
    }
}

/// Create campaign payload
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignCreate {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
}

/// Update campaign payload
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(starts_at: Option<i64>, ends_at: Option<i64>, is_active: bool) -> Campaign {
        Campaign {
            id: "c-1".to_string(),
            tenant_id: "t-1".to_string(),
            title: "Hafta Sonu İndirimi".to_string(),
            description: None,
            image_url: None,
            starts_at,
            ends_at,
            is_active,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_visibility_window() {
        let c = campaign(Some(100), Some(200), true);
        assert!(!c.is_visible_at(99));
        assert!(c.is_visible_at(100));
        assert!(c.is_visible_at(199));
        assert!(!c.is_visible_at(200));
    }

    #[test]
    fn test_open_ended_visibility() {
        let c = campaign(None, None, true);
        assert!(c.is_visible_at(0));
        assert!(c.is_visible_at(i64::MAX));
    }

    #[test]
    fn test_inactive_never_visible() {
        let c = campaign(None, None, false);
        assert!(!c.is_visible_at(150));
    }
}
