use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use voyage_catalog::{Destination, Package};
use voyage_domain::{Booking, NewBooking, PaymentStatus};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
}

/// A freshly persisted booking joined with its package title, which the
/// confirmation messaging needs.
#[derive(Debug, Clone)]
pub struct CreatedBooking {
    pub booking: Booking,
    pub package_title: String,
}

/// Repository for booking rows.
///
/// All updates are single-row and atomic, keyed by primary id, so
/// concurrent webhook deliveries for the same booking serialize at the
/// store and the last applied transition wins by arrival order there.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a booking. Returns `None` when the referenced package does
    /// not exist.
    async fn create(&self, input: &NewBooking) -> Result<Option<CreatedBooking>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, StoreError>;

    /// Look up the booking holding a provider payment-intent id. Needed
    /// by webhook events that carry no booking metadata.
    async fn find_by_payment_intent(&self, intent_id: &str)
        -> Result<Option<Booking>, StoreError>;

    /// Record the opened checkout session and the price snapshot.
    /// Returns `None` when the booking row is missing.
    async fn record_checkout_session(
        &self,
        id: Uuid,
        session_id: &str,
        amount: Decimal,
    ) -> Result<Option<Booking>, StoreError>;

    /// Apply a payment status transition. The sole mutation path for
    /// `payment_status`. A `None` intent id leaves any stored intent id
    /// untouched. Returns `None` when the booking row is missing.
    async fn record_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        payment_intent_id: Option<&str>,
    ) -> Result<Option<Booking>, StoreError>;
}

/// Read-only access to the destination/package catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_destinations(&self) -> Result<Vec<Destination>, StoreError>;

    async fn destination_by_slug(&self, slug: &str) -> Result<Option<Destination>, StoreError>;

    async fn list_packages(&self) -> Result<Vec<Package>, StoreError>;

    async fn packages_for_destination(
        &self,
        destination_id: Uuid,
    ) -> Result<Vec<Package>, StoreError>;

    async fn package_by_id(&self, id: Uuid) -> Result<Option<Package>, StoreError>;

    async fn package_by_slug(&self, slug: &str) -> Result<Option<Package>, StoreError>;
}
