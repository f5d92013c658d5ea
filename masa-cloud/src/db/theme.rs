//! Theme settings queries

use shared::models::{ThemeSettings, ThemeUpdate};
use sqlx::PgPool;

pub async fn get(pool: &PgPool, tenant_id: &str) -> Result<Option<ThemeSettings>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM theme_settings WHERE tenant_id = $1")
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

/// One row per tenant; unset fields keep their current (or default) value.
pub async fn upsert(
    pool: &PgPool,
    tenant_id: &str,
    data: &ThemeUpdate,
    now: i64,
) -> Result<ThemeSettings, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO theme_settings (tenant_id, primary_color, accent_color, logo_url,
                                    welcome_text, show_prices, updated_at)
        VALUES ($1, COALESCE($2, '#1f2937'), COALESCE($3, '#f59e0b'), $4, $5,
                COALESCE($6, TRUE), $7)
        ON CONFLICT (tenant_id)
        DO UPDATE SET
            primary_color = COALESCE($2, theme_settings.primary_color),
            accent_color = COALESCE($3, theme_settings.accent_color),
            logo_url = COALESCE($4, theme_settings.logo_url),
            welcome_text = COALESCE($5, theme_settings.welcome_text),
            show_prices = COALESCE($6, theme_settings.show_prices),
            updated_at = $7
        RETURNING *
        "#,
    )
    .bind(tenant_id)
    .bind(&data.primary_color)
    .bind(&data.accent_color)
    .bind(&data.logo_url)
    .bind(&data.welcome_text)
    .bind(data.show_prices)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Default theme row created at registration.
pub async fn create_default(pool: &PgPool, tenant_id: &str, now: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO theme_settings (tenant_id, updated_at) VALUES ($1, $2)
         ON CONFLICT (tenant_id) DO NOTHING",
    )
    .bind(tenant_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}
