use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use uuid::Uuid;

use voyage_core::payment::ProviderError;
use voyage_payments::CheckoutError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    session_id: String,
    url: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/checkout", post(start_checkout))
}

/// POST /v1/checkout
/// Open a hosted payment session for an existing booking.
async fn start_checkout(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CheckoutResponse>, AppError> {
    if !state.provider.is_configured() {
        return Err(AppError::PaymentUnavailable(
            "Payment provider is not configured".to_string(),
        ));
    }

    let package_id = parse_id(&body, "packageId");
    let booking_id = parse_id(&body, "bookingId");
    let (Some(package_id), Some(booking_id)) = (package_id, booking_id) else {
        return Err(AppError::ValidationError(
            "Package ID and Booking ID are required".to_string(),
        ));
    };

    let session = state
        .checkout
        .start_checkout(package_id, booking_id)
        .await
        .map_err(map_checkout_error)?;

    Ok(Json(CheckoutResponse {
        session_id: session.id,
        url: session.url,
    }))
}

fn parse_id(body: &serde_json::Value, key: &str) -> Option<Uuid> {
    body.get(key)
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
}

fn map_checkout_error(err: CheckoutError) -> AppError {
    match err {
        CheckoutError::PackageNotFound => AppError::NotFoundError("Package not found".to_string()),
        CheckoutError::BookingNotFound => AppError::NotFoundError("Booking not found".to_string()),
        CheckoutError::InvalidPrice => {
            AppError::InternalServerError("package price exceeds the chargeable range".to_string())
        }
        CheckoutError::Provider(ProviderError::NotConfigured) => {
            AppError::PaymentUnavailable("Payment provider is not configured".to_string())
        }
        CheckoutError::Provider(e) => AppError::PaymentUnavailable(e.to_string()),
        CheckoutError::Store(e) => AppError::InternalServerError(e.to_string()),
    }
}
