//! Password reset code storage
//!
//! Codes are argon2-hashed; one live record per (email, purpose) with an
//! expiry and an attempt counter.

use sqlx::PgPool;

#[derive(sqlx::FromRow)]
pub struct ResetRecord {
    pub email: String,
    pub purpose: String,
    pub code_hash: String,
    pub expires_at: i64,
    pub attempts: i32,
    pub created_at: i64,
}

pub async fn upsert(
    pool: &PgPool,
    email: &str,
    purpose: &str,
    code_hash: &str,
    expires_at: i64,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO password_resets (email, purpose, code_hash, expires_at, attempts, created_at)
         VALUES ($1, $2, $3, $4, 0, $5)
         ON CONFLICT (email, purpose)
         DO UPDATE SET code_hash = $3, expires_at = $4, attempts = 0, created_at = $5",
    )
    .bind(email)
    .bind(purpose)
    .bind(code_hash)
    .bind(expires_at)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find(
    pool: &PgPool,
    email: &str,
    purpose: &str,
) -> Result<Option<ResetRecord>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM password_resets WHERE email = $1 AND purpose = $2")
        .bind(email)
        .bind(purpose)
        .fetch_optional(pool)
        .await
}

pub async fn increment_attempts(
    pool: &PgPool,
    email: &str,
    purpose: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE password_resets SET attempts = attempts + 1 WHERE email = $1 AND purpose = $2")
        .bind(email)
        .bind(purpose)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, email: &str, purpose: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM password_resets WHERE email = $1 AND purpose = $2")
        .bind(email)
        .bind(purpose)
        .execute(pool)
        .await?;
    Ok(())
}
