//! Stripe hosted-checkout client.
//!
//! Implements checkout session creation over the Checkout Sessions API
//! and HMAC-SHA256 verification of the `Stripe-Signature` webhook
//! header.

use std::time::Duration;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use sha2::Sha256;

use voyage_core::payment::{CheckoutProvider, CheckoutSession, CheckoutSessionSpec, ProviderError};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// API secret key (`sk_...`). Empty means the provider is not
    /// configured and checkout degrades to an explicit error.
    pub secret_key: Secret<String>,
    /// Webhook signing secret (`whsec_...`).
    pub webhook_secret: Secret<String>,
    pub api_base_url: String,
    /// ISO currency code used for line items.
    pub currency: String,
    /// Bound on outbound calls; expiry surfaces as provider-unavailable.
    pub timeout_seconds: u64,
}

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    config: StripeConfig,
}

/// Subset of the Checkout Session resource this system reads back.
#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }

    /// Compute the hex HMAC-SHA256 digest Stripe expects over
    /// `"{timestamp}.{body}"`.
    fn compute_signature(&self, payload: &[u8], secret: &str) -> Result<String, ProviderError> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| ProviderError::InvalidSignature("invalid key length".to_string()))?;
        mac.update(payload);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Parse a `Stripe-Signature` header into its timestamp and `v1`
/// candidate digests. The header carries comma-separated `k=v` pairs
/// and may list several `v1` values during secret rotation.
fn parse_signature_header(header: &str) -> Result<(&str, Vec<&str>), ProviderError> {
    let mut timestamp = None;
    let mut candidates = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => candidates.push(value),
            _ => {}
        }
    }
    match (timestamp, candidates.is_empty()) {
        (Some(t), false) => Ok((t, candidates)),
        _ => Err(ProviderError::InvalidSignature(
            "malformed signature header".to_string(),
        )),
    }
}

#[async_trait]
impl CheckoutProvider for StripeClient {
    fn is_configured(&self) -> bool {
        !self.config.secret_key.expose_secret().is_empty()
    }

    async fn create_checkout_session(
        &self,
        spec: &CheckoutSessionSpec,
    ) -> Result<CheckoutSession, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured);
        }

        // The Checkout Sessions API takes form-encoded, bracketed keys.
        let mut form: Vec<(&str, String)> = vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            (
                "line_items[0][price_data][currency]",
                self.config.currency.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                spec.unit_amount_minor.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                spec.title.clone(),
            ),
            (
                "line_items[0][price_data][product_data][description]",
                spec.description.clone(),
            ),
            ("success_url", spec.success_url.clone()),
            ("cancel_url", spec.cancel_url.clone()),
            ("customer_email", spec.customer_email.clone()),
            ("metadata[bookingId]", spec.booking_id.to_string()),
            ("metadata[packageId]", spec.package_id.to_string()),
        ];
        if let Some(image) = &spec.image_url {
            form.push((
                "line_items[0][price_data][product_data][images][0]",
                image.clone(),
            ));
        }

        let url = format!("{}/checkout/sessions", self.config.api_base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.secret_key.expose_secret())
            .timeout(self.timeout())
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or(body);
            tracing::error!(status = %status, detail = %detail, "checkout session creation failed");
            return Err(ProviderError::Rejected(detail));
        }

        let session: SessionResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Rejected(format!("malformed session response: {e}")))?;
        let redirect = session
            .url
            .ok_or_else(|| ProviderError::Rejected("session carries no redirect url".to_string()))?;

        tracing::info!(
            session_id = %session.id,
            booking_id = %spec.booking_id,
            amount_minor = spec.unit_amount_minor,
            "checkout session created"
        );

        Ok(CheckoutSession {
            id: session.id,
            url: redirect,
        })
    }

    fn verify_webhook_signature(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<(), ProviderError> {
        let secret = self.config.webhook_secret.expose_secret();
        if secret.is_empty() {
            return Err(ProviderError::InvalidSignature(
                "webhook signing secret not configured".to_string(),
            ));
        }

        let (timestamp, candidates) = parse_signature_header(signature_header)?;
        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
        let expected = self.compute_signature(signed_payload.as_bytes(), secret)?;

        if candidates.iter().any(|candidate| *candidate == expected) {
            Ok(())
        } else {
            tracing::warn!("webhook signature verification failed");
            Err(ProviderError::InvalidSignature(
                "signature mismatch".to_string(),
            ))
        }
    }
}
