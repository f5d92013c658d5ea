//! Payment provider webhook
//!
//! Billing state transitions happen here and nowhere else: the checkout
//! endpoint only hands out a payment URL, and the provider confirms the
//! outcome through this signed callback. Deliveries are deduplicated by
//! event id, so provider retries are harmless.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use shared::error::{AppError, ErrorCode};

use super::{ApiResult, internal};
use crate::state::AppState;
use crate::{db, payments};

const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// POST /webhooks/payment
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<serde_json::Value> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::new(ErrorCode::WebhookSignatureInvalid))?;

    payments::verify_webhook_signature(&body, signature, &state.config.payment_webhook_secret)
        .map_err(|reason| {
            tracing::warn!(reason, "Webhook rejected");
            match reason {
                "Webhook timestamp too old" => AppError::new(ErrorCode::WebhookStale),
                _ => AppError::new(ErrorCode::WebhookSignatureInvalid),
            }
        })?;

    let event: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::new(ErrorCode::InvalidFormat))?;
    let event_id = event["id"].as_str().unwrap_or_default();
    let event_type = event["type"].as_str().unwrap_or_default();
    if event_id.is_empty() || event_type.is_empty() {
        return Err(AppError::new(ErrorCode::InvalidFormat));
    }

    let now = shared::util::now_millis();
    let first_delivery = db::webhook_events::mark_processed(&state.pool, event_id, event_type, now)
        .await
        .map_err(internal)?;
    if !first_delivery {
        tracing::debug!(event_id, "Duplicate webhook delivery ignored");
        return Ok(axum::Json(serde_json::json!({"received": true})));
    }

    let tenant_id = event["data"]["metadata"]["tenant_id"]
        .as_str()
        .unwrap_or_default();

    match event_type {
        "checkout.completed" => {
            let plan_id = event["data"]["metadata"]["plan_id"].as_str().unwrap_or_default();
            if tenant_id.is_empty() || plan_id.is_empty() {
                tracing::warn!(event_id, "checkout.completed without tenant/plan metadata");
                return Ok(axum::Json(serde_json::json!({"received": true})));
            }

            let activated =
                db::tenants::activate_with_plan(&state.pool, tenant_id, plan_id, now)
                    .await
                    .map_err(internal)?;
            if !activated {
                tracing::warn!(event_id, tenant_id, "checkout for unknown tenant");
                return Ok(axum::Json(serde_json::json!({"received": true})));
            }
            tracing::info!(tenant_id, plan_id, "Plan activated via checkout");

            let _ = db::audit::log(
                &state.pool,
                Some(tenant_id),
                None,
                "plan_activated",
                Some(serde_json::json!({"plan_id": plan_id})),
                now,
            )
            .await;

            notify_tenant(&state, tenant_id, plan_id, PlanMail::Activated).await;
        }
        "subscription.deleted" => {
            if db::tenants::update_status(&state.pool, tenant_id, "canceled", now)
                .await
                .map_err(internal)?
            {
                tracing::info!(tenant_id, "Subscription cancelled");
            }
        }
        "invoice.payment_failed" => {
            if db::tenants::update_status(&state.pool, tenant_id, "suspended", now)
                .await
                .map_err(internal)?
            {
                tracing::warn!(tenant_id, "Tenant suspended after failed payment");
                notify_tenant(&state, tenant_id, "", PlanMail::PaymentFailed).await;
            }
        }
        other => {
            tracing::debug!(event_type = other, "Unhandled webhook event type");
        }
    }

    Ok(axum::Json(serde_json::json!({"received": true})))
}

enum PlanMail {
    Activated,
    PaymentFailed,
}

/// Fire-and-forget billing email to the tenant contact.
async fn notify_tenant(state: &AppState, tenant_id: &str, plan_id: &str, kind: PlanMail) {
    let Ok(Some(tenant)) = db::tenants::find_by_id(&state.pool, tenant_id).await else {
        return;
    };
    let plan_name = match kind {
        PlanMail::Activated => match db::plans::find(&state.pool, plan_id).await {
            Ok(Some(plan)) => plan.name,
            _ => plan_id.to_string(),
        },
        PlanMail::PaymentFailed => String::new(),
    };

    let email = state.email.clone();
    tokio::spawn(async move {
        let result = match kind {
            PlanMail::Activated => {
                email
                    .send_plan_activated(&tenant.contact_email, &plan_name)
                    .await
            }
            PlanMail::PaymentFailed => email.send_payment_failed(&tenant.contact_email).await,
        };
        if let Err(e) = result {
            tracing::warn!("Billing email failed: {e}");
        }
    });
}
