//! Webhook reconciliation: the payment status state machine.
//!
//! The provider delivers events asynchronously and retries on its own
//! schedule, so this component must verify authenticity, apply each
//! transition at most once in effect, and acknowledge everything it
//! cannot act on rather than provoke endless redelivery.

use std::sync::Arc;

use uuid::Uuid;

use voyage_core::payment::CheckoutProvider;
use voyage_core::repository::{BookingRepository, CatalogRepository, StoreError};
use voyage_domain::{Booking, PaymentStatus};
use voyage_notify::{render, Mailer, SenderProfile};

use crate::events::{CheckoutSessionObject, WebhookEvent};

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// Bad or missing signature. No state was touched.
    #[error("webhook authentication failed: {0}")]
    Authentication(String),
    /// Signature verified but the body is not a provider event.
    #[error("{0}")]
    Payload(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct WebhookReconciler {
    bookings: Arc<dyn BookingRepository>,
    catalog: Arc<dyn CatalogRepository>,
    provider: Arc<dyn CheckoutProvider>,
    mailer: Arc<dyn Mailer>,
    sender: SenderProfile,
}

impl WebhookReconciler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        catalog: Arc<dyn CatalogRepository>,
        provider: Arc<dyn CheckoutProvider>,
        mailer: Arc<dyn Mailer>,
        sender: SenderProfile,
    ) -> Self {
        Self {
            bookings,
            catalog,
            provider,
            mailer,
            sender,
        }
    }

    /// Authenticate and apply one webhook delivery.
    ///
    /// `Ok(())` means the delivery is acknowledged, including the cases
    /// where the referenced booking no longer exists; those are logged
    /// no-ops, never caller-visible failures.
    pub async fn process(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
    ) -> Result<(), WebhookError> {
        let header = signature_header
            .ok_or_else(|| WebhookError::Authentication("missing signature header".to_string()))?;

        self.provider
            .verify_webhook_signature(payload, header)
            .map_err(|e| WebhookError::Authentication(e.to_string()))?;

        let event =
            WebhookEvent::parse(payload).map_err(|e| WebhookError::Payload(e.to_string()))?;

        match event {
            WebhookEvent::CheckoutSessionCompleted(session) => {
                self.on_session_completed(session).await
            }
            WebhookEvent::PaymentIntentFailed(intent) => {
                self.apply_by_intent(&intent.id, PaymentStatus::Failed).await
            }
            WebhookEvent::ChargeRefunded(charge) => match charge.payment_intent {
                Some(intent_id) => self.apply_by_intent(&intent_id, PaymentStatus::Refunded).await,
                None => {
                    tracing::warn!(charge = %charge.id, "refunded charge carries no payment intent");
                    Ok(())
                }
            },
            WebhookEvent::Unhandled { kind } => {
                tracing::debug!(kind = %kind, "unhandled webhook event");
                Ok(())
            }
        }
    }

    async fn on_session_completed(
        &self,
        session: CheckoutSessionObject,
    ) -> Result<(), WebhookError> {
        let booking_ref = session
            .metadata
            .as_ref()
            .and_then(|m| m.booking_id.as_deref());
        let Some(booking_ref) = booking_ref else {
            tracing::warn!(session = %session.id, "completed session carries no booking reference");
            return Ok(());
        };

        let booking_id = match Uuid::parse_str(booking_ref) {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(session = %session.id, booking_ref = %booking_ref, "booking reference is not a valid id");
                return Ok(());
            }
        };

        let Some(existing) = self.bookings.find_by_id(booking_id).await? else {
            tracing::warn!(booking_id = %booking_id, "completed session for unknown booking");
            return Ok(());
        };

        if existing.payment_status == Some(PaymentStatus::Paid) {
            tracing::debug!(booking_id = %booking_id, "booking already paid, duplicate delivery");
            return Ok(());
        }

        let updated = self
            .bookings
            .record_payment_status(booking_id, PaymentStatus::Paid, session.payment_intent.as_deref())
            .await?;

        if let Some(booking) = updated {
            tracing::info!(booking_id = %booking.id, session = %session.id, "payment completed");
            self.send_payment_receipt(&booking).await;
        }

        Ok(())
    }

    async fn apply_by_intent(
        &self,
        intent_id: &str,
        status: PaymentStatus,
    ) -> Result<(), WebhookError> {
        let Some(booking) = self.bookings.find_by_payment_intent(intent_id).await? else {
            tracing::warn!(intent = %intent_id, status = %status, "no booking for payment intent");
            return Ok(());
        };

        if booking.payment_status == Some(status) {
            tracing::debug!(booking_id = %booking.id, status = %status, "status already applied, duplicate delivery");
            return Ok(());
        }

        self.bookings
            .record_payment_status(booking.id, status, None)
            .await?;

        tracing::info!(booking_id = %booking.id, status = %status, "payment status reconciled");
        Ok(())
    }

    /// Best-effort: a failed notification never fails the delivery.
    async fn send_payment_receipt(&self, booking: &Booking) {
        let title = match self.catalog.package_by_id(booking.package_id).await {
            Ok(Some(package)) => package.title,
            Ok(None) => {
                tracing::warn!(booking_id = %booking.id, "paid booking references a missing package");
                return;
            }
            Err(e) => {
                tracing::warn!(booking_id = %booking.id, error = %e, "could not load package for receipt");
                return;
            }
        };

        let message = render::payment_receipt(&self.sender, booking, &title);
        if let Err(e) = self.mailer.send(&message).await {
            tracing::warn!(booking_id = %booking.id, error = %e, "payment receipt not delivered");
        }
    }
}
