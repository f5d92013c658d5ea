//! masa-cloud — multi-tenant restaurant SaaS backend
//!
//! Long-running service that:
//! - Serves the public QR menu and guest ordering flow
//! - Hosts the tenant panel API (cookie sessions, plan-gated features)
//! - Maintains per-tenant daily revenue rollups
//! - Handles billing through a hosted-checkout provider and its webhooks
//! - Provides the platform operator (super admin) API

mod api;
mod auth;
mod config;
mod db;
mod email;
mod export;
mod notify;
mod payments;
mod plan;
mod state;
mod stats;
mod util;

use std::net::SocketAddr;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "masa_cloud=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting masa-cloud (env: {})", config.environment);

    let state = AppState::new(&config).await?;
    let app = api::create_router(state.clone());

    // Periodic rate limiter cleanup (every 5 minutes)
    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter.cleanup().await;
        }
    });

    // Periodic expired-session sweep (hourly; the middleware also deletes
    // lazily on hit)
    let sweep_pool = state.pool.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            match db::sessions::delete_expired(&sweep_pool, shared::util::now_millis()).await {
                Ok(n) if n > 0 => tracing::info!(deleted = n, "Expired sessions swept"),
                Ok(_) => {}
                Err(e) => tracing::warn!("Session sweep failed: {e}"),
            }
        }
    });

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("masa-cloud HTTP listening on {http_addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
