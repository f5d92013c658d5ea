//! Panel billing: current subscription and hosted checkout
//!
//! Checkout only returns a payment URL; the tenant's plan and status are
//! mutated exclusively by the verified provider webhook.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::Plan;

use crate::api::{ApiResult, internal};
use crate::auth::Session;
use crate::state::AppState;
use crate::{db, payments};

#[derive(Serialize)]
pub struct BillingOverview {
    pub status: String,
    pub trial_ends_at: Option<i64>,
    pub current_plan: Option<Plan>,
    /// Publicly purchasable catalog
    pub plans: Vec<Plan>,
}

/// GET /api/panel/billing
pub async fn overview(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<BillingOverview> {
    let tenant_id = session.tenant_id()?;

    let tenant = db::tenants::find_by_id(&state.pool, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;
    let current_plan = match tenant.plan_id.as_deref() {
        Some(plan_id) => db::plans::find(&state.pool, plan_id)
            .await
            .map_err(internal)?,
        None => None,
    };
    let plans = db::plans::list(&state.pool, true).await.map_err(internal)?;

    Ok(Json(BillingOverview {
        status: tenant.status,
        trial_ends_at: tenant.trial_ends_at,
        current_plan,
        plans,
    }))
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub plan_id: String,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

/// POST /api/panel/billing/checkout
pub async fn checkout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<CheckoutRequest>,
) -> ApiResult<CheckoutResponse> {
    session.require_owner()?;
    let tenant_id = session.tenant_id()?;

    let tenant = db::tenants::find_by_id(&state.pool, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;

    let plan = db::plans::find(&state.pool, &req.plan_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::PlanNotFound))?;
    if !plan.is_public {
        return Err(AppError::new(ErrorCode::PlanNotFound));
    }

    let checkout_url = payments::create_checkout_session(
        &state.config.payment_api_base,
        &state.config.payment_secret_key,
        &tenant.id,
        &plan.id,
        &tenant.contact_email,
        &state.config.checkout_success_url,
        &state.config.checkout_cancel_url,
    )
    .await
    .map_err(|e| {
        tracing::error!(tenant_id = %tenant.id, plan_id = %plan.id, "Checkout session failed: {e}");
        AppError::new(ErrorCode::PaymentProviderError)
    })?;

    tracing::info!(tenant_id = %tenant.id, plan_id = %plan.id, "Checkout session created");
    Ok(Json(CheckoutResponse { checkout_url }))
}
