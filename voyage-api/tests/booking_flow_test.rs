//! End-to-end router tests for the booking and payment lifecycle.

mod common;

use axum::http::StatusCode;
use tower::ServiceExt;

use common::*;

const GOOD_SIGNATURE: Option<&str> = Some("t=1700000000,v1=mock");

fn booking_form(package_id: &str) -> String {
    format!(
        "packageId={}&name=Ada+Lovelace&email=ada%40example.com&phone=%2B44+20+7946+0000",
        package_id
    )
}

fn completed_event(booking_id: &str, intent: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "evt_completed",
        "type": "checkout.session.completed",
        "data": {"object": {
            "id": "cs_test_1",
            "payment_intent": intent,
            "metadata": {"bookingId": booking_id}
        }}
    })
}

async fn submit_booking(ctx: &TestContext) -> String {
    let response = ctx
        .app
        .clone()
        .oneshot(form_post(
            "/v1/bookings",
            booking_form(&ctx.package.id.to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    json["bookingId"].as_str().expect("booking id").to_string()
}

#[tokio::test]
async fn booking_submission_creates_a_pending_booking() {
    let ctx = context();
    let booking_id = submit_booking(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(get(&format!("/v1/bookings/{booking_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Ada Lovelace");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["phone"], "+44 20 7946 0000");
    assert!(json["paymentStatus"].is_null());
    assert!(json["stripeSessionId"].is_null());

    // Operator notice plus customer auto-reply.
    assert_eq!(ctx.mailer.deliveries(), 2);
}

#[tokio::test]
async fn booking_form_errors_are_surfaced_inline() {
    let ctx = context();
    let response = ctx
        .app
        .clone()
        .oneshot(form_post(
            "/v1/bookings",
            format!(
                "packageId={}&name=A&email=not-an-address",
                ctx.package.id
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("Invalid email address"));
    assert!(message.contains("Name must be at least 2 characters"));
    assert_eq!(ctx.mailer.deliveries(), 0);
}

#[tokio::test]
async fn booking_for_an_unknown_package_fails_softly() {
    let ctx = context();
    let response = ctx
        .app
        .clone()
        .oneshot(form_post(
            "/v1/bookings",
            booking_form(&uuid::Uuid::new_v4().to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn contact_message_length_boundary() {
    let ctx = context();

    let short = form_post(
        "/v1/contact",
        "name=Grace+Hopper&email=grace%40example.com&message=123456789".to_string(),
    );
    let json = body_json(ctx.app.clone().oneshot(short).await.unwrap()).await;
    assert_eq!(json["success"], false);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("Message must be at least 10 characters"));

    let long_enough = form_post(
        "/v1/contact",
        "name=Grace+Hopper&email=grace%40example.com&message=1234567890".to_string(),
    );
    let json = body_json(ctx.app.clone().oneshot(long_enough).await.unwrap()).await;
    assert_eq!(json["success"], true);
    assert_eq!(ctx.mailer.deliveries(), 2);
}

#[tokio::test]
async fn checkout_records_session_id_and_amount_snapshot() {
    let ctx = context();
    let booking_id = submit_booking(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(json_post(
            "/v1/checkout",
            serde_json::json!({
                "packageId": ctx.package.id.to_string(),
                "bookingId": booking_id,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let session_id = json["sessionId"].as_str().unwrap();
    assert!(session_id.starts_with("cs_mock_"));
    assert!(json["url"].as_str().unwrap().starts_with("https://"));

    let booking = body_json(
        ctx.app
            .clone()
            .oneshot(get(&format!("/v1/bookings/{booking_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(booking["stripeSessionId"], session_id);
    assert_eq!(booking["amount"], "1899.99");
    assert!(booking["paymentStatus"].is_null());
}

#[tokio::test]
async fn checkout_requires_both_ids() {
    let ctx = context();
    let response = ctx
        .app
        .clone()
        .oneshot(json_post(
            "/v1/checkout",
            serde_json::json!({ "packageId": ctx.package.id.to_string() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Package ID and Booking ID are required");
}

#[tokio::test]
async fn checkout_for_an_unknown_package_is_a_404() {
    let ctx = context();
    let booking_id = submit_booking(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(json_post(
            "/v1/checkout",
            serde_json::json!({
                "packageId": uuid::Uuid::new_v4().to_string(),
                "bookingId": booking_id,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Package not found");
}

#[tokio::test]
async fn checkout_degrades_when_the_provider_is_not_configured() {
    let ctx = context_with_provider(voyage_payments::MockCheckoutProvider {
        configured: false,
        fail_create: false,
    });
    let response = ctx
        .app
        .clone()
        .oneshot(json_post("/v1/checkout", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Payment provider is not configured");
}

#[tokio::test]
async fn webhook_with_an_invalid_signature_mutates_nothing() {
    let ctx = context();
    let booking_id = submit_booking(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(webhook_post(
            completed_event(&booking_id, "pi_1"),
            Some("invalid"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let booking = body_json(
        ctx.app
            .clone()
            .oneshot(get(&format!("/v1/bookings/{booking_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert!(booking["paymentStatus"].is_null());
}

#[tokio::test]
async fn webhook_without_a_signature_header_is_rejected() {
    let ctx = context();
    let response = ctx
        .app
        .clone()
        .oneshot(webhook_post(completed_event("b", "pi"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn webhook_for_an_unknown_payment_intent_is_acknowledged() {
    let ctx = context();
    let response = ctx
        .app
        .clone()
        .oneshot(webhook_post(
            serde_json::json!({
                "type": "payment_intent.payment_failed",
                "data": {"object": {"id": "pi_unknown"}}
            }),
            GOOD_SIGNATURE,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["received"], true);
}

#[tokio::test]
async fn payment_lifecycle_paid_then_refunded() {
    let ctx = context();
    let booking_id = submit_booking(&ctx).await;

    ctx.app
        .clone()
        .oneshot(json_post(
            "/v1/checkout",
            serde_json::json!({
                "packageId": ctx.package.id.to_string(),
                "bookingId": booking_id,
            }),
        ))
        .await
        .unwrap();
    let after_submission = ctx.mailer.deliveries();

    // The provider confirms the payment asynchronously.
    let response = ctx
        .app
        .clone()
        .oneshot(webhook_post(
            completed_event(&booking_id, "pi_e2e"),
            GOOD_SIGNATURE,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let paid = body_json(
        ctx.app
            .clone()
            .oneshot(get(&format!("/v1/bookings/{booking_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(paid["paymentStatus"], "paid");
    assert_eq!(paid["stripePaymentIntentId"], "pi_e2e");
    assert_eq!(paid["amount"], "1899.99");
    assert_eq!(ctx.mailer.deliveries(), after_submission + 1);

    // Duplicate delivery: same end state, no second receipt.
    ctx.app
        .clone()
        .oneshot(webhook_post(
            completed_event(&booking_id, "pi_e2e"),
            GOOD_SIGNATURE,
        ))
        .await
        .unwrap();
    assert_eq!(ctx.mailer.deliveries(), after_submission + 1);

    // A later refund flips the terminal state.
    ctx.app
        .clone()
        .oneshot(webhook_post(
            serde_json::json!({
                "type": "charge.refunded",
                "data": {"object": {"id": "ch_1", "payment_intent": "pi_e2e"}}
            }),
            GOOD_SIGNATURE,
        ))
        .await
        .unwrap();

    let refunded = body_json(
        ctx.app
            .clone()
            .oneshot(get(&format!("/v1/bookings/{booking_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(refunded["paymentStatus"], "refunded");
}
