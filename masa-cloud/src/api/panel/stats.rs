//! Panel revenue statistics
//!
//! Serves the `daily_stats` rollup; nothing here recomputes from orders.

use axum::response::IntoResponse;
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{DailyStat, StatSummary};

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::state::AppState;
use crate::{db, export};

const DEFAULT_RANGE_DAYS: i64 = 30;

#[derive(Deserialize)]
pub struct RangeQuery {
    /// Inclusive start date, `YYYY-MM-DD`
    pub from: Option<NaiveDate>,
    /// Inclusive end date, `YYYY-MM-DD`
    pub to: Option<NaiveDate>,
}

impl RangeQuery {
    /// Defaults to the trailing 30 days ending today (UTC).
    fn resolve(&self) -> Result<(NaiveDate, NaiveDate), AppError> {
        let today = shared::util::millis_to_date(shared::util::now_millis());
        let to = self.to.unwrap_or(today);
        let from = self
            .from
            .unwrap_or_else(|| to - Duration::days(DEFAULT_RANGE_DAYS - 1));
        if from > to {
            return Err(AppError::validation("Başlangıç tarihi bitişten sonra olamaz"));
        }
        Ok((from, to))
    }
}

/// GET /api/panel/stats/daily?from&to
pub async fn daily(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Vec<DailyStat>> {
    let tenant_id = session.tenant_id()?;
    let (from, to) = query.resolve()?;

    let rows = db::daily_stats::list_range(&state.pool, tenant_id, from, to)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

/// GET /api/panel/stats/summary?from&to
pub async fn summary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<StatSummary> {
    let tenant_id = session.tenant_id()?;
    let (from, to) = query.resolve()?;

    let summary = db::daily_stats::summary_range(&state.pool, tenant_id, from, to)
        .await
        .map_err(internal)?;
    Ok(Json(summary))
}

/// GET /api/panel/stats/export.csv?from&to
pub async fn export_csv(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tenant_id = session.tenant_id()?;
    let (from, to) = query.resolve()?;

    let rows = db::daily_stats::list_range(&state.pool, tenant_id, from, to)
        .await
        .map_err(internal)?;

    let mut body = export::csv_row(&["date", "total_revenue", "order_count"]);
    for row in &rows {
        body.push_str(&export::csv_row(&[
            &row.stat_date.to_string(),
            &row.total_revenue.to_string(),
            &row.order_count.to_string(),
        ]));
    }

    Ok((export::csv_headers("gunluk-rapor.csv"), body))
}
