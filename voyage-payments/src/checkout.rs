//! Checkout session initiation.

use std::sync::Arc;

use uuid::Uuid;

use voyage_catalog::pricing;
use voyage_core::payment::{CheckoutProvider, CheckoutSession, CheckoutSessionSpec, ProviderError};
use voyage_core::repository::{BookingRepository, CatalogRepository, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("package not found")]
    PackageNotFound,
    #[error("booking not found")]
    BookingNotFound,
    #[error("package price is not representable in minor units")]
    InvalidPrice,
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Opens a hosted checkout session for an existing booking and records
/// the session reference on it.
///
/// Sets identifiers and the price snapshot only; payment status belongs
/// to the webhook reconciler.
pub struct CheckoutService {
    catalog: Arc<dyn CatalogRepository>,
    bookings: Arc<dyn BookingRepository>,
    provider: Arc<dyn CheckoutProvider>,
    /// Public site base URL the provider redirects back to.
    base_url: String,
}

impl CheckoutService {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        bookings: Arc<dyn BookingRepository>,
        provider: Arc<dyn CheckoutProvider>,
        base_url: String,
    ) -> Self {
        Self {
            catalog,
            bookings,
            provider,
            base_url,
        }
    }

    pub async fn start_checkout(
        &self,
        package_id: Uuid,
        booking_id: Uuid,
    ) -> Result<CheckoutSession, CheckoutError> {
        let package = self
            .catalog
            .package_by_id(package_id)
            .await?
            .ok_or(CheckoutError::PackageNotFound)?;

        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(CheckoutError::BookingNotFound)?;

        let unit_amount =
            pricing::to_minor_units(package.price).ok_or(CheckoutError::InvalidPrice)?;

        let spec = CheckoutSessionSpec {
            booking_id: booking.id,
            package_id: package.id,
            title: package.title.clone(),
            description: "Travel package booking".to_string(),
            image_url: package.images.first().cloned(),
            unit_amount_minor: unit_amount,
            customer_email: booking.email.clone(),
            // The provider substitutes its session id for the
            // {CHECKOUT_SESSION_ID} token on redirect.
            success_url: format!(
                "{}/booking/success?session_id={{CHECKOUT_SESSION_ID}}",
                self.base_url
            ),
            cancel_url: format!("{}/booking/cancel?booking_id={}", self.base_url, booking.id),
        };

        let session = self.provider.create_checkout_session(&spec).await?;

        self.bookings
            .record_checkout_session(booking.id, &session.id, package.price)
            .await?
            .ok_or(CheckoutError::BookingNotFound)?;

        tracing::info!(
            booking_id = %booking.id,
            package_id = %package.id,
            session_id = %session.id,
            "checkout session recorded on booking"
        );

        Ok(session)
    }
}
