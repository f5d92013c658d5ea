//! Branch queries

use shared::models::{Branch, BranchCreate, BranchUpdate};
use sqlx::PgPool;

pub async fn list(pool: &PgPool, tenant_id: &str) -> Result<Vec<Branch>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM branches WHERE tenant_id = $1 ORDER BY created_at")
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}

pub async fn find(
    pool: &PgPool,
    tenant_id: &str,
    branch_id: &str,
) -> Result<Option<Branch>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM branches WHERE id = $1 AND tenant_id = $2")
        .bind(branch_id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

pub async fn count(pool: &PgPool, tenant_id: &str) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM branches WHERE tenant_id = $1")
        .bind(tenant_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(
    pool: &PgPool,
    id: &str,
    tenant_id: &str,
    data: &BranchCreate,
    now: i64,
) -> Result<Branch, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO branches (id, tenant_id, name, address, phone, is_active,
                               created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, TRUE, $6, $6)
         RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    tenant_id: &str,
    branch_id: &str,
    data: &BranchUpdate,
    now: i64,
) -> Result<Option<Branch>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE branches SET
            name = COALESCE($1, name),
            address = COALESCE($2, address),
            phone = COALESCE($3, phone),
            is_active = COALESCE($4, is_active),
            updated_at = $5
         WHERE id = $6 AND tenant_id = $7
         RETURNING *",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(data.is_active)
    .bind(now)
    .bind(branch_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, tenant_id: &str, branch_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM branches WHERE id = $1 AND tenant_id = $2")
        .bind(branch_id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_tables(pool: &PgPool, branch_id: &str) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM dining_tables WHERE branch_id = $1")
            .bind(branch_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
