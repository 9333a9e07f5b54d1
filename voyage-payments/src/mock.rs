//! In-process stand-in for the hosted payment provider.

use async_trait::async_trait;

use voyage_core::payment::{CheckoutProvider, CheckoutSession, CheckoutSessionSpec, ProviderError};

/// Fake provider for tests and local development.
///
/// Session ids encode the booking id so assertions can correlate them.
/// Signature verification accepts everything except the literal header
/// `"invalid"`, which triggers the rejection path.
pub struct MockCheckoutProvider {
    pub configured: bool,
    pub fail_create: bool,
}

impl Default for MockCheckoutProvider {
    fn default() -> Self {
        Self {
            configured: true,
            fail_create: false,
        }
    }
}

#[async_trait]
impl CheckoutProvider for MockCheckoutProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn create_checkout_session(
        &self,
        spec: &CheckoutSessionSpec,
    ) -> Result<CheckoutSession, ProviderError> {
        if !self.configured {
            return Err(ProviderError::NotConfigured);
        }
        if self.fail_create {
            return Err(ProviderError::Unavailable(
                "simulated gateway outage".to_string(),
            ));
        }
        Ok(CheckoutSession {
            id: format!("cs_mock_{}", spec.booking_id.simple()),
            url: format!(
                "https://checkout.mock.test/pay/{}",
                spec.booking_id.simple()
            ),
        })
    }

    fn verify_webhook_signature(
        &self,
        _payload: &[u8],
        signature_header: &str,
    ) -> Result<(), ProviderError> {
        if signature_header == "invalid" {
            return Err(ProviderError::InvalidSignature(
                "mock signature rejection".to_string(),
            ));
        }
        Ok(())
    }
}
