use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::ValidationFailure;

/// Terminal payment outcomes reported by the payment provider.
///
/// A freshly created booking carries no status at all (`None` on
/// [`Booking::payment_status`]); only the webhook reconciler moves it
/// into one of these states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer's request to purchase a travel package.
///
/// Contact fields are fixed at creation; the payment fields are mutated
/// only by the checkout initiator (`stripe_session_id`, `amount`) and the
/// webhook reconciler (`payment_status`, `stripe_payment_intent_id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub package_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub stripe_session_id: Option<String>,
    pub stripe_payment_intent_id: Option<String>,
    /// Snapshot of the package price taken when checkout starts.
    pub amount: Option<Decimal>,
    pub payment_status: Option<PaymentStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated booking input, ready for persistence.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub package_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// Raw booking form input, exactly as posted by the HTML form.
///
/// Absent fields deserialize to empty values so they fail the declared
/// rules instead of rejecting the request wholesale.
#[derive(Debug, Deserialize, Validate)]
pub struct BookingForm {
    #[serde(rename = "packageId", default)]
    #[validate(length(min = 1, message = "Package is required"))]
    pub package_id: String,
    #[serde(default)]
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl BookingForm {
    /// Check the declared field rules and produce a typed record.
    ///
    /// A `packageId` that is present but not a well-formed UUID is
    /// reported as a field error rather than deferred to the store's
    /// foreign-key check.
    pub fn into_new_booking(self) -> Result<NewBooking, ValidationFailure> {
        self.validate().map_err(ValidationFailure::from)?;

        let package_id = Uuid::parse_str(&self.package_id)
            .map_err(|_| ValidationFailure::single("packageId", "Invalid package reference"))?;

        Ok(NewBooking {
            package_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
        })
    }
}
