//! Application state for masa-cloud

use sqlx::PgPool;

use crate::auth::rate_limit::RateLimiter;
use crate::config::Config;
use crate::email::EmailSender;
use crate::notify::NotifyHub;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Service configuration
    pub config: Config,
    /// Transactional email sender (SES client built on first use)
    pub email: EmailSender,
    /// Per-tenant panel event hub (WebSocket fan-out)
    pub notify: NotifyHub,
    /// Rate limiter for login/registration/QR order routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Connect the pool, run migrations and assemble collaborators.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            pool,
            config: config.clone(),
            email: EmailSender::new(config.ses_from_email.clone()),
            notify: NotifyHub::new(),
            rate_limiter: RateLimiter::new(),
        })
    }
}
