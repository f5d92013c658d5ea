//! Order queries

use rust_decimal::Decimal;
use shared::models::{Order, OrderItem};
use sqlx::PgPool;

/// Line item snapshot captured at placement
pub struct NewOrderItem {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

/// Insert an order with its items in one transaction.
#[allow(clippy::too_many_arguments)]
pub async fn create_with_items(
    pool: &PgPool,
    order_id: &str,
    tenant_id: &str,
    branch_id: &str,
    table_id: &str,
    total: Decimal,
    note: Option<&str>,
    items: &[NewOrderItem],
    now: i64,
) -> Result<Order, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let order: Order = sqlx::query_as(
        "INSERT INTO orders (id, tenant_id, branch_id, table_id, status, total, note,
                             created_at, updated_at)
         VALUES ($1, $2, $3, $4, 'pending', $5, $6, $7, $7)
         RETURNING *",
    )
    .bind(order_id)
    .bind(tenant_id)
    .bind(branch_id)
    .bind(table_id)
    .bind(total)
    .bind(note)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO order_items (id, order_id, product_id, product_name, unit_price,
                                      quantity, line_total)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(crate::util::new_id())
        .bind(order_id)
        .bind(&item.product_id)
        .bind(&item.product_name)
        .bind(item.unit_price)
        .bind(item.quantity)
        .bind(item.line_total)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(order)
}

pub async fn find(
    pool: &PgPool,
    tenant_id: &str,
    order_id: &str,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE id = $1 AND tenant_id = $2")
        .bind(order_id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

pub async fn items(pool: &PgPool, order_id: &str) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY product_name")
        .bind(order_id)
        .fetch_all(pool)
        .await
}

pub async fn list(
    pool: &PgPool,
    tenant_id: &str,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Order>, sqlx::Error> {
    match status {
        Some(status) => {
            sqlx::query_as(
                "SELECT * FROM orders WHERE tenant_id = $1 AND status = $2
                 ORDER BY created_at DESC LIMIT $3 OFFSET $4",
            )
            .bind(tenant_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as(
                "SELECT * FROM orders WHERE tenant_id = $1
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            )
            .bind(tenant_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn count(
    pool: &PgPool,
    tenant_id: &str,
    status: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = match status {
        Some(status) => {
            sqlx::query_as("SELECT COUNT(*) FROM orders WHERE tenant_id = $1 AND status = $2")
                .bind(tenant_id)
                .bind(status)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_as("SELECT COUNT(*) FROM orders WHERE tenant_id = $1")
                .bind(tenant_id)
                .fetch_one(pool)
                .await?
        }
    };
    Ok(count)
}

/// Compare-and-set the status so two concurrent panel updates cannot both
/// count as the same transition. Returns `false` when the order moved away
/// from `expected_prev` in the meantime.
pub async fn update_status(
    pool: &PgPool,
    tenant_id: &str,
    order_id: &str,
    expected_prev: &str,
    new_status: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE orders SET status = $1, updated_at = $2
         WHERE id = $3 AND tenant_id = $4 AND status = $5",
    )
    .bind(new_status)
    .bind(now)
    .bind(order_id)
    .bind(tenant_id)
    .bind(expected_prev)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Full order list for CSV export, newest first, no paging.
pub async fn list_for_export(pool: &PgPool, tenant_id: &str) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE tenant_id = $1 ORDER BY created_at DESC")
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}
