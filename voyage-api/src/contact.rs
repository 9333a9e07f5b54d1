use axum::{extract::State, routing::post, Form, Json, Router};
use serde::Serialize;
use tracing::info;

use voyage_domain::ContactForm;
use voyage_notify::render;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    success: bool,
    message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/contact", post(submit_contact))
}

/// POST /v1/contact
async fn submit_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Json<ContactResponse> {
    let submission = match form.into_submission() {
        Ok(submission) => submission,
        Err(failure) => {
            return Json(ContactResponse {
                success: false,
                message: failure.summary(),
            })
        }
    };

    let messages = [
        render::contact_operator_notice(&state.sender, &submission),
        render::contact_auto_reply(&state.sender, &submission),
    ];
    for message in &messages {
        if let Err(e) = state.mailer.send(message).await {
            tracing::warn!(error = %e, "contact notification not delivered");
        }
    }

    info!(from = %submission.email, "contact form submission received");

    Json(ContactResponse {
        success: true,
        message: "Message sent successfully! We'll get back to you soon.".to_string(),
    })
}
