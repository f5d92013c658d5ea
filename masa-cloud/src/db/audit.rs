//! Audit log writes
//!
//! Best-effort: callers use `let _ = audit::log(...)` and never fail a
//! request over a missing audit row.

use sqlx::PgPool;

pub async fn log(
    pool: &PgPool,
    tenant_id: Option<&str>,
    actor: Option<&str>,
    action: &str,
    detail: Option<serde_json::Value>,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_log (tenant_id, actor, action, detail, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(tenant_id)
    .bind(actor)
    .bind(action)
    .bind(detail)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}
