use axum::{
    extract::{Path, State},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use voyage_core::repository::CreatedBooking;
use voyage_domain::{Booking, BookingForm};
use voyage_notify::render;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    booking_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package_id: Option<Uuid>,
}

impl SubmitResponse {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
            booking_id: None,
            package_id: None,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(submit_booking))
        .route("/v1/bookings/{id}", get(get_booking))
}

/// POST /v1/bookings
/// Accept a booking form submission. The form poster always gets a
/// `{success, message}` answer, never a 5xx.
async fn submit_booking(
    State(state): State<AppState>,
    Form(form): Form<BookingForm>,
) -> Json<SubmitResponse> {
    let input = match form.into_new_booking() {
        Ok(input) => input,
        Err(failure) => return Json(SubmitResponse::failure(failure.summary())),
    };

    let created = match state.bookings.create(&input).await {
        Ok(Some(created)) => created,
        Ok(None) => return Json(SubmitResponse::failure("Package not found.".to_string())),
        Err(e) => {
            tracing::error!(error = %e, "booking creation failed");
            return Json(SubmitResponse::failure(
                "Failed to submit booking request.".to_string(),
            ));
        }
    };

    notify_booking(&state, &created).await;

    info!(
        booking_id = %created.booking.id,
        package = %created.package_title,
        "booking request received"
    );

    Json(SubmitResponse {
        success: true,
        message: "Booking request submitted successfully! We'll contact you soon.".to_string(),
        booking_id: Some(created.booking.id),
        package_id: Some(created.booking.package_id),
    })
}

// Best-effort; a dead mail sink must not fail the submission.
async fn notify_booking(state: &AppState, created: &CreatedBooking) {
    let messages = [
        render::booking_operator_notice(&state.sender, &created.booking, &created.package_title),
        render::booking_confirmation(&state.sender, &created.booking, &created.package_title),
    ];
    for message in &messages {
        if let Err(e) = state.mailer.send(message).await {
            tracing::warn!(error = %e, "booking notification not delivered");
        }
    }
}

/// GET /v1/bookings/{id}
/// The success/cancel pages re-read the booking here. Payment status in
/// this response reflects whatever the webhook has applied so far; the
/// page is never the source of truth.
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .bookings
        .find_by_id(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Booking not found".to_string()))?;
    Ok(Json(booking))
}
