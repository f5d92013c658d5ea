//! Plan access evaluation
//!
//! Decides, per request, whether a tenant may use the product and which
//! limits apply. Evaluated fresh on every call; verdicts are never cached
//! because trial expiry and operator suspensions must take effect
//! immediately.

use shared::error::{AppError, ErrorCode};
use shared::models::{CurrentUsage, PlanLimits, TenantAccess, TenantStatus};
use sqlx::PgPool;

use crate::db;

/// Turkish denial reason shown on the panel lock screen and QR menu
pub const TRIAL_EXPIRED_MSG: &str =
    "Deneme süreniz sona erdi. Devam etmek için lütfen bir plan satın alın.";
pub const ACCOUNT_INACTIVE_MSG: &str =
    "Hesabınız aktif değil. Lütfen destek ekibiyle iletişime geçin.";

/// Plan names that grant every feature regardless of keyword
const ALL_INCLUSIVE_MARKERS: [&str; 2] = ["her şey dahil", "tüm özellikler"];

/// Evaluate a tenant's access and entitlements.
///
/// Loads the tenant with its plan and usage counts in one query. A missing
/// tenant is a hard error surfaced to the caller; a denial (expired trial,
/// inactive account) is a normal verdict, not an error.
pub async fn evaluate(pool: &PgPool, tenant_id: &str) -> Result<TenantAccess, AppError> {
    let row = db::tenants::load_access_row(pool, tenant_id)
        .await
        .map_err(|e| {
            tracing::error!(tenant_id = %tenant_id, "Access row query failed: {e}");
            AppError::new(ErrorCode::DatabaseError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;

    let limits = PlanLimits {
        branch_limit: row.branch_limit,
        table_limit: row.table_limit,
        features: db::plans::parse_features(&row.features),
        current_usage: CurrentUsage {
            users: row.users,
            categories: row.categories,
            products: row.products,
        },
    };

    Ok(decide(
        TenantStatus::from_db(&row.status),
        row.trial_ends_at,
        shared::util::now_millis(),
        limits,
    ))
}

/// Pure decision half of [`evaluate`], split out so the branches are
/// testable without a database.
pub fn decide(
    status: Option<TenantStatus>,
    trial_ends_at: Option<i64>,
    now: i64,
    limits: PlanLimits,
) -> TenantAccess {
    match status {
        Some(TenantStatus::Trial) if trial_ends_at.is_some_and(|t| t < now) => {
            TenantAccess::denied(TRIAL_EXPIRED_MSG)
        }
        Some(TenantStatus::Trial) | Some(TenantStatus::Active) => TenantAccess::allowed(limits),
        // Suspended, canceled, or an unrecognized stored value
        _ => TenantAccess::denied(ACCOUNT_INACTIVE_MSG),
    }
}

/// Does the plan carry a feature matching `keyword`?
///
/// Case-insensitive substring match against each feature label. Labels are
/// operator-authored marketing strings, so matching is deliberately
/// permissive; an all-inclusive plan name grants everything. Absent limits
/// (denied access) never match.
pub fn has_feature(limits: Option<&PlanLimits>, keyword: &str) -> bool {
    let Some(limits) = limits else {
        return false;
    };
    let keyword = keyword.to_lowercase();
    limits.features.iter().any(|label| {
        let label = label.to_lowercase();
        label.contains(&keyword) || ALL_INCLUSIVE_MARKERS.iter().any(|m| label.contains(m))
    })
}

/// Guard for feature-gated routes: evaluate, then require the keyword.
///
/// Maps a denial to the evaluator's Turkish reason and a missing feature
/// to [`ErrorCode::FeatureNotAvailable`].
pub async fn require_feature(
    pool: &PgPool,
    tenant_id: &str,
    keyword: &str,
) -> Result<PlanLimits, AppError> {
    let access = evaluate(pool, tenant_id).await?;
    let Some(limits) = access.limits else {
        return Err(AppError::with_message(
            ErrorCode::TenantInactive,
            access.reason.unwrap_or_else(|| ACCOUNT_INACTIVE_MSG.into()),
        ));
    };
    if !has_feature(Some(&limits), keyword) {
        return Err(AppError::with_message(
            ErrorCode::FeatureNotAvailable,
            "Bu özellik mevcut planınızda bulunmuyor.",
        ));
    }
    Ok(limits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(features: &[&str]) -> PlanLimits {
        PlanLimits {
            branch_limit: 3,
            table_limit: 50,
            features: features.iter().map(|s| s.to_string()).collect(),
            current_usage: CurrentUsage::default(),
        }
    }

    #[test]
    fn test_active_tenant_allowed_with_limits() {
        let access = decide(Some(TenantStatus::Active), None, 1_000, limits(&[]));
        assert!(access.allowed);
        assert!(access.reason.is_none());
        assert_eq!(access.limits.unwrap().table_limit, 50);
    }

    #[test]
    fn test_trial_within_window_allowed() {
        let access = decide(Some(TenantStatus::Trial), Some(2_000), 1_000, limits(&[]));
        assert!(access.allowed);
    }

    #[test]
    fn test_expired_trial_denied() {
        let access = decide(Some(TenantStatus::Trial), Some(999), 1_000, limits(&[]));
        assert!(!access.allowed);
        assert_eq!(access.reason.as_deref(), Some(TRIAL_EXPIRED_MSG));
        assert!(access.limits.is_none());
    }

    #[test]
    fn test_trial_expiring_exactly_now_still_allowed() {
        // Strictly-before comparison: t == now is not yet expired
        let access = decide(Some(TenantStatus::Trial), Some(1_000), 1_000, limits(&[]));
        assert!(access.allowed);
    }

    #[test]
    fn test_trial_without_expiry_allowed() {
        let access = decide(Some(TenantStatus::Trial), None, 1_000, limits(&[]));
        assert!(access.allowed);
    }

    #[test]
    fn test_suspended_and_canceled_denied() {
        for status in [TenantStatus::Suspended, TenantStatus::Canceled] {
            let access = decide(Some(status), None, 1_000, limits(&[]));
            assert!(!access.allowed);
            assert_eq!(access.reason.as_deref(), Some(ACCOUNT_INACTIVE_MSG));
        }
    }

    #[test]
    fn test_unknown_status_denied() {
        let access = decide(None, None, 1_000, limits(&[]));
        assert!(!access.allowed);
    }

    #[test]
    fn test_has_feature_substring_case_insensitive() {
        let l = limits(&["Analizler & Kampanyalar"]);
        assert!(has_feature(Some(&l), "kampanya"));
        assert!(has_feature(Some(&l), "KAMPANYA"));
        assert!(has_feature(Some(&l), "analiz"));

        let l = limits(&["Temel QR Menü"]);
        assert!(!has_feature(Some(&l), "kampanya"));
        assert!(has_feature(Some(&l), "qr menü"));
    }

    #[test]
    fn test_all_inclusive_grants_everything() {
        let l = limits(&["Her Şey Dahil"]);
        assert!(has_feature(Some(&l), "anything-not-present"));

        let l = limits(&["Tüm Özellikler"]);
        assert!(has_feature(Some(&l), "kampanya"));
    }

    #[test]
    fn test_absent_limits_never_match() {
        assert!(!has_feature(None, "kampanya"));
        assert!(!has_feature(Some(&limits(&[])), "kampanya"));
    }
}
