//! Daily stat rollup queries

use chrono::NaiveDate;
use shared::models::{DailyStat, StatSummary};
use sqlx::PgPool;

use crate::stats::StatDelta;

/// Apply a delta to the (tenant, day) rollup in one atomic statement.
///
/// The single `INSERT .. ON CONFLICT .. DO UPDATE` makes concurrent
/// increments commute at the database; there is deliberately no
/// read-modify-write anywhere. A freshly created row clamps at zero,
/// since a brand-new day cannot open with a reversal; the conflict arm
/// adds the raw delta.
pub async fn apply_delta(
    pool: &PgPool,
    tenant_id: &str,
    date: NaiveDate,
    delta: &StatDelta,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO daily_stats (tenant_id, stat_date, total_revenue, order_count, updated_at)
        VALUES ($1, $2, GREATEST($3, 0), GREATEST($4, 0), $5)
        ON CONFLICT (tenant_id, stat_date)
        DO UPDATE SET
            total_revenue = daily_stats.total_revenue + $3,
            order_count = daily_stats.order_count + $4,
            updated_at = $5
        "#,
    )
    .bind(tenant_id)
    .bind(date)
    .bind(delta.revenue)
    .bind(delta.orders)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_range(
    pool: &PgPool,
    tenant_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DailyStat>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM daily_stats
         WHERE tenant_id = $1 AND stat_date BETWEEN $2 AND $3
         ORDER BY stat_date",
    )
    .bind(tenant_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

pub async fn summary_range(
    pool: &PgPool,
    tenant_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<StatSummary, sqlx::Error> {
    sqlx::query_as(
        "SELECT COALESCE(SUM(total_revenue), 0) AS total_revenue,
                COALESCE(SUM(order_count), 0) AS order_count,
                COUNT(*) AS days
         FROM daily_stats
         WHERE tenant_id = $1 AND stat_date BETWEEN $2 AND $3",
    )
    .bind(tenant_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await
}
