//! Dining table queries

use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use sqlx::PgPool;

pub async fn list(pool: &PgPool, tenant_id: &str) -> Result<Vec<DiningTable>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM dining_tables WHERE tenant_id = $1 ORDER BY branch_id, name")
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}

pub async fn find(
    pool: &PgPool,
    tenant_id: &str,
    table_id: &str,
) -> Result<Option<DiningTable>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM dining_tables WHERE id = $1 AND tenant_id = $2")
        .bind(table_id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

/// Resolve a public QR token to its (active) table.
pub async fn find_by_qr_token(
    pool: &PgPool,
    qr_token: &str,
) -> Result<Option<DiningTable>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM dining_tables WHERE qr_token = $1 AND is_active")
        .bind(qr_token)
        .fetch_optional(pool)
        .await
}

pub async fn count(pool: &PgPool, tenant_id: &str) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM dining_tables WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn create(
    pool: &PgPool,
    id: &str,
    tenant_id: &str,
    qr_token: &str,
    data: &DiningTableCreate,
    now: i64,
) -> Result<DiningTable, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO dining_tables (id, tenant_id, branch_id, name, qr_token, capacity,
                                    is_active, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, $7)
         RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&data.branch_id)
    .bind(&data.name)
    .bind(qr_token)
    .bind(data.capacity.unwrap_or(4))
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    tenant_id: &str,
    table_id: &str,
    data: &DiningTableUpdate,
    now: i64,
) -> Result<Option<DiningTable>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE dining_tables SET
            name = COALESCE($1, name),
            capacity = COALESCE($2, capacity),
            is_active = COALESCE($3, is_active),
            updated_at = $4
         WHERE id = $5 AND tenant_id = $6
         RETURNING *",
    )
    .bind(&data.name)
    .bind(data.capacity)
    .bind(data.is_active)
    .bind(now)
    .bind(table_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

/// Issue a fresh QR token, invalidating previously printed codes.
pub async fn rotate_qr_token(
    pool: &PgPool,
    tenant_id: &str,
    table_id: &str,
    qr_token: &str,
    now: i64,
) -> Result<Option<DiningTable>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE dining_tables SET qr_token = $1, updated_at = $2
         WHERE id = $3 AND tenant_id = $4
         RETURNING *",
    )
    .bind(qr_token)
    .bind(now)
    .bind(table_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, tenant_id: &str, table_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM dining_tables WHERE id = $1 AND tenant_id = $2")
        .bind(table_id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
