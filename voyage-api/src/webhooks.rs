use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde_json::json;

use voyage_payments::WebhookError;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/webhooks/payments/stripe", post(handle_stripe_webhook))
}

/// POST /v1/webhooks/payments/stripe
/// Receive payment status updates from the provider. Verification runs
/// over the raw body, so this handler must not consume it as JSON first.
async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.provider.is_configured() {
        return Err(AppError::PaymentUnavailable(
            "Payment provider is not configured".to_string(),
        ));
    }

    let signature = headers
        .get("stripe-signature")
        .and_then(|value| value.to_str().ok());

    state
        .reconciler
        .process(&body, signature)
        .await
        .map_err(|e| match e {
            WebhookError::Authentication(msg) => AppError::AuthenticationError(msg),
            WebhookError::Payload(msg) => AppError::ValidationError(msg),
            WebhookError::Store(e) => AppError::InternalServerError(e.to_string()),
        })?;

    Ok(Json(json!({ "received": true })))
}
