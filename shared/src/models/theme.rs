//! QR menu theme model

use serde::{Deserialize, Serialize};

/// Per-tenant QR menu appearance settings
///
/// Colors are `#rrggbb` strings validated at the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ThemeSettings {
    pub tenant_id: String,
    pub primary_color: String,
    pub accent_color: String,
    pub logo_url: Option<String>,
    /// Welcome text shown on top of the QR menu
    pub welcome_text: Option<String>,
    pub show_prices: bool,
    pub updated_at: i64,
}

impl ThemeSettings {
    pub const DEFAULT_PRIMARY: &'static str = "#1f2937";
    pub const DEFAULT_ACCENT: &'static str = "#f59e0b";

    /// Default theme for tenants that never saved one
    pub fn default_for(tenant_id: &str, now: i64) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            primary_color: Self::DEFAULT_PRIMARY.to_string(),
            accent_color: Self::DEFAULT_ACCENT.to_string(),
            logo_url: None,
            welcome_text: None,
            show_prices: true,
            updated_at: now,
        }
    }
}

/// Update theme payload
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeUpdate {
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub logo_url: Option<String>,
    pub welcome_text: Option<String>,
    pub show_prices: Option<bool>,
}

/// Check a `#rrggbb` hex color string
pub fn is_valid_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_validation() {
        assert!(is_valid_hex_color("#1f2937"));
        assert!(is_valid_hex_color("#FFFFFF"));
        assert!(!is_valid_hex_color("1f2937"));
        assert!(!is_valid_hex_color("#fff"));
        assert!(!is_valid_hex_color("#1f293g"));
        assert!(!is_valid_hex_color("#1f29377"));
    }

    #[test]
    fn test_default_theme() {
        let theme = ThemeSettings::default_for("t-1", 1000);
        assert_eq!(theme.tenant_id, "t-1");
        assert!(is_valid_hex_color(&theme.primary_color));
        assert!(is_valid_hex_color(&theme.accent_color));
        assert!(theme.show_prices);
    }
}
