//! Panel user queries

use shared::models::PanelUser;
use sqlx::PgPool;

pub async fn create(
    pool: &PgPool,
    id: &str,
    tenant_id: Option<&str>,
    email: &str,
    password_hash: &str,
    display_name: &str,
    role: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO panel_users (id, tenant_id, email, password_hash, display_name,
                                  role, is_active, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, $7)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(email)
    .bind(password_hash)
    .bind(display_name)
    .bind(role)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<PanelUser>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM panel_users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<PanelUser>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM panel_users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_password(
    pool: &PgPool,
    user_id: &str,
    password_hash: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE panel_users SET password_hash = $1, updated_at = $2 WHERE id = $3")
        .bind(password_hash)
        .bind(now)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_password_by_email(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE panel_users SET password_hash = $1, updated_at = $2 WHERE email = $3")
            .bind(password_hash)
            .bind(now)
            .bind(email)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}
