//! Plan catalog queries
//!
//! The `features` column stores a JSON-encoded array of labels; it is
//! parsed here, at the storage boundary, so nothing downstream ever
//! matches against raw column text.

use rust_decimal::Decimal;
use shared::models::Plan;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct PlanRow {
    id: String,
    name: String,
    monthly_price: Decimal,
    branch_limit: i32,
    table_limit: i32,
    features: String,
    is_public: bool,
    created_at: i64,
    updated_at: i64,
}

impl PlanRow {
    fn into_plan(self) -> Plan {
        Plan {
            features: parse_features(&self.features),
            id: self.id,
            name: self.name,
            monthly_price: self.monthly_price,
            branch_limit: self.branch_limit,
            table_limit: self.table_limit,
            is_public: self.is_public,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parse the stored feature list. Malformed content is an operator data
/// error, not a request error: log it and treat the plan as featureless.
pub fn parse_features(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(features) => features,
        Err(e) => {
            tracing::warn!("Unparseable plan features column ({e}): {raw}");
            Vec::new()
        }
    }
}

fn encode_features(features: &[String]) -> String {
    serde_json::to_string(features).unwrap_or_else(|_| "[]".to_string())
}

pub async fn find(pool: &PgPool, id: &str) -> Result<Option<Plan>, sqlx::Error> {
    let row: Option<PlanRow> = sqlx::query_as("SELECT * FROM plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(PlanRow::into_plan))
}

pub async fn list(pool: &PgPool, public_only: bool) -> Result<Vec<Plan>, sqlx::Error> {
    let rows: Vec<PlanRow> = if public_only {
        sqlx::query_as("SELECT * FROM plans WHERE is_public ORDER BY monthly_price")
            .fetch_all(pool)
            .await?
    } else {
        sqlx::query_as("SELECT * FROM plans ORDER BY monthly_price")
            .fetch_all(pool)
            .await?
    };
    Ok(rows.into_iter().map(PlanRow::into_plan).collect())
}

pub async fn create(
    pool: &PgPool,
    id: &str,
    name: &str,
    monthly_price: Decimal,
    branch_limit: i32,
    table_limit: i32,
    features: &[String],
    is_public: bool,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO plans (id, name, monthly_price, branch_limit, table_limit,
                            features, is_public, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)",
    )
    .bind(id)
    .bind(name)
    .bind(monthly_price)
    .bind(branch_limit)
    .bind(table_limit)
    .bind(encode_features(features))
    .bind(is_public)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update(
    pool: &PgPool,
    id: &str,
    name: Option<&str>,
    monthly_price: Option<Decimal>,
    branch_limit: Option<i32>,
    table_limit: Option<i32>,
    features: Option<&[String]>,
    is_public: Option<bool>,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE plans SET
            name = COALESCE($1, name),
            monthly_price = COALESCE($2, monthly_price),
            branch_limit = COALESCE($3, branch_limit),
            table_limit = COALESCE($4, table_limit),
            features = COALESCE($5, features),
            is_public = COALESCE($6, is_public),
            updated_at = $7
         WHERE id = $8",
    )
    .bind(name)
    .bind(monthly_price)
    .bind(branch_limit)
    .bind(table_limit)
    .bind(features.map(encode_features))
    .bind(is_public)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_subscribed_tenants(pool: &PgPool, plan_id: &str) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tenants WHERE plan_id = $1")
        .bind(plan_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_feature_list() {
        let features = parse_features(r#"["Temel QR Menü", "Analizler & Kampanyalar"]"#);
        assert_eq!(features.len(), 2);
        assert_eq!(features[0], "Temel QR Menü");
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_features("[]").is_empty());
    }

    #[test]
    fn test_malformed_content_yields_empty_list() {
        assert!(parse_features("not json").is_empty());
        assert!(parse_features(r#"{"a":1}"#).is_empty());
        assert!(parse_features(r#"[1, 2, 3]"#).is_empty());
        assert!(parse_features("").is_empty());
    }

    #[test]
    fn test_encode_roundtrip() {
        let features = vec!["Her Şey Dahil".to_string()];
        assert_eq!(parse_features(&encode_features(&features)), features);
    }
}
