//! Daily revenue aggregate model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-tenant daily revenue rollup
///
/// One row per (tenant_id, stat_date), where `stat_date` is the UTC
/// calendar day of the order's completion. Maintained incrementally by
/// the order status recorder, never recomputed from orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DailyStat {
    pub tenant_id: String,
    pub stat_date: NaiveDate,
    pub total_revenue: Decimal,
    pub order_count: i64,
    pub updated_at: i64,
}

/// Aggregate of a date range, for the panel summary card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StatSummary {
    pub total_revenue: Decimal,
    pub order_count: i64,
    pub days: i64,
}
