//! Tenant queries

use shared::models::Tenant;
use sqlx::PgPool;

/// Tenant + plan + usage counts for the access evaluator, loaded in one
/// round trip ("point lookup with eager-loaded associations").
#[derive(sqlx::FromRow)]
pub struct AccessRow {
    pub status: String,
    pub trial_ends_at: Option<i64>,
    pub branch_limit: i32,
    pub table_limit: i32,
    /// Raw JSON-encoded feature labels, parsed by the caller
    pub features: String,
    pub users: i64,
    pub categories: i64,
    pub products: i64,
}

pub async fn load_access_row(
    pool: &PgPool,
    tenant_id: &str,
) -> Result<Option<AccessRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT
            t.status,
            t.trial_ends_at,
            COALESCE(p.branch_limit, 0) AS branch_limit,
            COALESCE(p.table_limit, 0) AS table_limit,
            COALESCE(p.features, '[]') AS features,
            (SELECT COUNT(*) FROM panel_users u
               WHERE u.tenant_id = t.id AND u.is_active) AS users,
            (SELECT COUNT(*) FROM menu_categories c
               WHERE c.tenant_id = t.id) AS categories,
            (SELECT COUNT(*) FROM menu_products mp
               WHERE mp.tenant_id = t.id) AS products
        FROM tenants t
        LEFT JOIN plans p ON p.id = t.plan_id
        WHERE t.id = $1
        "#,
    )
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    id: &str,
    name: &str,
    slug: &str,
    email: &str,
    phone: Option<&str>,
    plan_id: &str,
    trial_ends_at: i64,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO tenants (id, name, slug, status, plan_id, trial_ends_at,
                              contact_email, contact_phone, created_at, updated_at)
         VALUES ($1, $2, $3, 'trial', $4, $5, $6, $7, $8, $8)",
    )
    .bind(id)
    .bind(name)
    .bind(slug)
    .bind(plan_id)
    .bind(trial_ends_at)
    .bind(email)
    .bind(phone)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tenants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tenants WHERE contact_email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn update_status(
    pool: &PgPool,
    tenant_id: &str,
    status: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE tenants SET status = $1, updated_at = $2 WHERE id = $3")
        .bind(status)
        .bind(now)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Assign a plan and activate the tenant (checkout completion, admin action).
pub async fn activate_with_plan(
    pool: &PgPool,
    tenant_id: &str,
    plan_id: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE tenants SET plan_id = $1, status = 'active', updated_at = $2 WHERE id = $3",
    )
    .bind(plan_id)
    .bind(now)
    .bind(tenant_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn set_plan(
    pool: &PgPool,
    tenant_id: &str,
    plan_id: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE tenants SET plan_id = $1, updated_at = $2 WHERE id = $3")
        .bind(plan_id)
        .bind(now)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Push the trial end out by `days` from whichever is later: the current
/// expiry or now. Also flips the status back to `trial`.
pub async fn extend_trial(
    pool: &PgPool,
    tenant_id: &str,
    days: i64,
    now: i64,
) -> Result<Option<i64>, sqlx::Error> {
    let extension = days * 86_400_000;
    let row: Option<(i64,)> = sqlx::query_as(
        "UPDATE tenants
         SET trial_ends_at = GREATEST(COALESCE(trial_ends_at, $2), $2) + $1,
             status = 'trial',
             updated_at = $2
         WHERE id = $3
         RETURNING trial_ends_at",
    )
    .bind(extension)
    .bind(now)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(t,)| t))
}

pub async fn list(
    pool: &PgPool,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Tenant>, sqlx::Error> {
    match status {
        Some(status) => {
            sqlx::query_as(
                "SELECT * FROM tenants WHERE status = $1
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            )
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as("SELECT * FROM tenants ORDER BY created_at DESC LIMIT $1 OFFSET $2")
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await
        }
    }
}

pub async fn count(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = match status {
        Some(status) => {
            sqlx::query_as("SELECT COUNT(*) FROM tenants WHERE status = $1")
                .bind(status)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_as("SELECT COUNT(*) FROM tenants")
                .fetch_one(pool)
                .await?
        }
    };
    Ok(count)
}
