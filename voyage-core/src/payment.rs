use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the provider needs to open a hosted checkout page for one
/// booking: a single line item plus the callback URLs and correlation
/// metadata.
#[derive(Debug, Clone)]
pub struct CheckoutSessionSpec {
    pub booking_id: Uuid,
    pub package_id: Uuid,
    /// Line item display name (the package title).
    pub title: String,
    pub description: String,
    /// First gallery image, when the package has one.
    pub image_url: Option<String>,
    /// Charge amount in integer minor currency units.
    pub unit_amount_minor: i64,
    pub customer_email: String,
    /// May contain the provider's session-id placeholder token.
    pub success_url: String,
    pub cancel_url: String,
}

/// An open hosted-checkout session at the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's opaque session id (e.g. `cs_...`).
    pub id: String,
    /// Redirect URL for the customer's browser.
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("payment provider is not configured")]
    NotConfigured,
    #[error("payment provider unreachable: {0}")]
    Unavailable(String),
    #[error("payment provider rejected the request: {0}")]
    Rejected(String),
    #[error("webhook signature rejected: {0}")]
    InvalidSignature(String),
}

/// Hosted payment provider capability.
///
/// Injected into the checkout and webhook components so the reconciler
/// stays testable against a fake provider.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Whether credentials are present. Callers degrade to an explicit
    /// "unavailable" response when this is false.
    fn is_configured(&self) -> bool;

    /// Open a hosted checkout session describing one line item.
    async fn create_checkout_session(
        &self,
        spec: &CheckoutSessionSpec,
    ) -> Result<CheckoutSession, ProviderError>;

    /// Verify a webhook delivery's signature header against the raw
    /// request body. Must not be skipped for any event kind.
    fn verify_webhook_signature(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<(), ProviderError>;
}
