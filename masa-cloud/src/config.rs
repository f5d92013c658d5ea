//! Service configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Masa Cloud configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// SES sender email address
    pub ses_from_email: String,
    /// Payment provider REST API base URL
    pub payment_api_base: String,
    /// Payment provider secret key
    pub payment_secret_key: String,
    /// Payment provider webhook signing secret
    pub payment_webhook_secret: String,
    /// URL to redirect after successful plan checkout
    pub checkout_success_url: String,
    /// URL to redirect after cancelled plan checkout
    pub checkout_cancel_url: String,
    /// Public base URL for QR menu links (printed on table codes)
    pub qr_base_url: String,
    /// Free trial length for self-signup tenants, in days
    pub trial_days: i64,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            ses_from_email: std::env::var("SES_FROM_EMAIL")
                .unwrap_or_else(|_| "destek@masa.app".into()),
            payment_api_base: std::env::var("PAYMENT_API_BASE")
                .unwrap_or_else(|_| "https://api.odeme-servisi.com/v1".into()),
            payment_secret_key: Self::require_secret("PAYMENT_SECRET_KEY", &environment)?,
            payment_webhook_secret: Self::require_secret("PAYMENT_WEBHOOK_SECRET", &environment)?,
            checkout_success_url: std::env::var("CHECKOUT_SUCCESS_URL")
                .unwrap_or_else(|_| "https://panel.masa.app/billing/success".into()),
            checkout_cancel_url: std::env::var("CHECKOUT_CANCEL_URL")
                .unwrap_or_else(|_| "https://panel.masa.app/billing/cancel".into()),
            qr_base_url: std::env::var("QR_BASE_URL")
                .unwrap_or_else(|_| "https://menu.masa.app".into()),
            trial_days: std::env::var("TRIAL_DAYS")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(14),
            environment,
        })
    }
}
