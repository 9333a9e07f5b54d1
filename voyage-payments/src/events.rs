//! Typed model of the provider's webhook deliveries.
//!
//! Dispatch works over a closed variant set so a new event kind is a
//! compile-time-checked match arm, not a stringly-typed branch.

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
#[error("invalid webhook payload: {0}")]
pub struct EventParseError(pub String);

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    data: EnvelopeData,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    object: serde_json::Value,
}

/// `checkout.session.completed` payload subset.
#[derive(Debug, Deserialize)]
pub struct CheckoutSessionObject {
    pub id: String,
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub metadata: Option<SessionMetadata>,
}

/// Correlation metadata attached when the session was opened.
#[derive(Debug, Deserialize)]
pub struct SessionMetadata {
    #[serde(rename = "bookingId")]
    pub booking_id: Option<String>,
    #[serde(rename = "packageId")]
    pub package_id: Option<String>,
}

/// `payment_intent.payment_failed` payload subset. Carries no booking
/// metadata; correlation goes through the stored intent id.
#[derive(Debug, Deserialize)]
pub struct PaymentIntentObject {
    pub id: String,
}

/// `charge.refunded` payload subset.
#[derive(Debug, Deserialize)]
pub struct ChargeObject {
    pub id: String,
    #[serde(default)]
    pub payment_intent: Option<String>,
}

#[derive(Debug)]
pub enum WebhookEvent {
    CheckoutSessionCompleted(CheckoutSessionObject),
    PaymentIntentFailed(PaymentIntentObject),
    ChargeRefunded(ChargeObject),
    /// Acknowledged and otherwise ignored.
    Unhandled { kind: String },
}

impl WebhookEvent {
    pub fn parse(payload: &[u8]) -> Result<Self, EventParseError> {
        let envelope: Envelope =
            serde_json::from_slice(payload).map_err(|e| EventParseError(e.to_string()))?;

        let event = match envelope.kind.as_str() {
            "checkout.session.completed" => WebhookEvent::CheckoutSessionCompleted(
                serde_json::from_value(envelope.data.object)
                    .map_err(|e| EventParseError(e.to_string()))?,
            ),
            "payment_intent.payment_failed" => WebhookEvent::PaymentIntentFailed(
                serde_json::from_value(envelope.data.object)
                    .map_err(|e| EventParseError(e.to_string()))?,
            ),
            "charge.refunded" => WebhookEvent::ChargeRefunded(
                serde_json::from_value(envelope.data.object)
                    .map_err(|e| EventParseError(e.to_string()))?,
            ),
            _ => WebhookEvent::Unhandled {
                kind: envelope.kind,
            },
        };

        Ok(event)
    }
}
