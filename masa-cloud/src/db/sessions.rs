//! Panel session queries

use sqlx::PgPool;

/// Session row joined with the owning user, as read on every request
#[derive(sqlx::FromRow)]
pub struct SessionUser {
    pub user_id: String,
    pub tenant_id: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub expires_at: i64,
}

pub async fn create(
    pool: &PgPool,
    token_hash: &str,
    user_id: &str,
    expires_at: i64,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO panel_sessions (token_hash, user_id, expires_at, created_at)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(token_hash)
    .bind(user_id)
    .bind(expires_at)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_user_by_token_hash(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<SessionUser>, sqlx::Error> {
    sqlx::query_as(
        "SELECT u.id AS user_id, u.tenant_id, u.role, u.is_active, s.expires_at
         FROM panel_sessions s
         JOIN panel_users u ON u.id = s.user_id
         WHERE s.token_hash = $1",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, token_hash: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM panel_sessions WHERE token_hash = $1")
        .bind(token_hash)
        .execute(pool)
        .await?;
    Ok(())
}

/// Revoke every session of a user (password change).
pub async fn delete_for_user(pool: &PgPool, user_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM panel_sessions WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Periodic sweep of expired rows; lazy deletion covers the rest.
pub async fn delete_expired(pool: &PgPool, now: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM panel_sessions WHERE expires_at <= $1")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
