//! Campaign queries

use shared::models::{Campaign, CampaignCreate, CampaignUpdate};
use sqlx::PgPool;

pub async fn list(pool: &PgPool, tenant_id: &str) -> Result<Vec<Campaign>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM campaigns WHERE tenant_id = $1 ORDER BY created_at DESC")
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}

/// Campaigns currently visible on the public menu.
pub async fn list_visible(
    pool: &PgPool,
    tenant_id: &str,
    now: i64,
) -> Result<Vec<Campaign>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM campaigns
         WHERE tenant_id = $1 AND is_active
           AND (starts_at IS NULL OR starts_at <= $2)
           AND (ends_at IS NULL OR ends_at > $2)
         ORDER BY created_at DESC",
    )
    .bind(tenant_id)
    .bind(now)
    .fetch_all(pool)
    .await
}

pub async fn find(
    pool: &PgPool,
    tenant_id: &str,
    campaign_id: &str,
) -> Result<Option<Campaign>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM campaigns WHERE id = $1 AND tenant_id = $2")
        .bind(campaign_id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    id: &str,
    tenant_id: &str,
    data: &CampaignCreate,
    now: i64,
) -> Result<Campaign, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO campaigns (id, tenant_id, title, description, image_url, starts_at,
                                ends_at, is_active, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8, $8)
         RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(data.starts_at)
    .bind(data.ends_at)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    tenant_id: &str,
    campaign_id: &str,
    data: &CampaignUpdate,
    now: i64,
) -> Result<Option<Campaign>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE campaigns SET
            title = COALESCE($1, title),
            description = COALESCE($2, description),
            image_url = COALESCE($3, image_url),
            starts_at = COALESCE($4, starts_at),
            ends_at = COALESCE($5, ends_at),
            is_active = COALESCE($6, is_active),
            updated_at = $7
         WHERE id = $8 AND tenant_id = $9
         RETURNING *",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(data.starts_at)
    .bind(data.ends_at)
    .bind(data.is_active)
    .bind(now)
    .bind(campaign_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(
    pool: &PgPool,
    tenant_id: &str,
    campaign_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM campaigns WHERE id = $1 AND tenant_id = $2")
        .bind(campaign_id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
