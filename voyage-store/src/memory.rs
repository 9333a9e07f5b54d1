//! In-memory repository implementations.
//!
//! Back the service in tests and local development without a database;
//! the trait contracts match the Postgres implementations, including
//! the single-row update semantics.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use voyage_catalog::{Destination, Package};
use voyage_core::repository::{
    BookingRepository, CatalogRepository, CreatedBooking, StoreError,
};
use voyage_domain::{Booking, NewBooking, PaymentStatus};

pub struct MemoryCatalogRepository {
    destinations: Vec<Destination>,
    packages: Vec<Package>,
}

impl MemoryCatalogRepository {
    pub fn new(destinations: Vec<Destination>, packages: Vec<Package>) -> Self {
        Self {
            destinations,
            packages,
        }
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn list_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        Ok(self.destinations.clone())
    }

    async fn destination_by_slug(&self, slug: &str) -> Result<Option<Destination>, StoreError> {
        Ok(self.destinations.iter().find(|d| d.slug == slug).cloned())
    }

    async fn list_packages(&self) -> Result<Vec<Package>, StoreError> {
        Ok(self.packages.clone())
    }

    async fn packages_for_destination(
        &self,
        destination_id: Uuid,
    ) -> Result<Vec<Package>, StoreError> {
        Ok(self
            .packages
            .iter()
            .filter(|p| p.destination_id == Some(destination_id))
            .cloned()
            .collect())
    }

    async fn package_by_id(&self, id: Uuid) -> Result<Option<Package>, StoreError> {
        Ok(self.packages.iter().find(|p| p.id == id).cloned())
    }

    async fn package_by_slug(&self, slug: &str) -> Result<Option<Package>, StoreError> {
        Ok(self.packages.iter().find(|p| p.slug == slug).cloned())
    }
}

pub struct MemoryBookingRepository {
    package_titles: HashMap<Uuid, String>,
    rows: Mutex<HashMap<Uuid, Booking>>,
}

impl MemoryBookingRepository {
    pub fn new(packages: &[Package]) -> Self {
        Self {
            package_titles: packages
                .iter()
                .map(|p| (p.id, p.title.clone()))
                .collect(),
            rows: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Booking>>, StoreError> {
        self.rows
            .lock()
            .map_err(|_| StoreError::Database("booking store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn create(&self, input: &NewBooking) -> Result<Option<CreatedBooking>, StoreError> {
        let Some(package_title) = self.package_titles.get(&input.package_id).cloned() else {
            return Ok(None);
        };

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            package_id: input.package_id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            message: input.message.clone(),
            stripe_session_id: None,
            stripe_payment_intent_id: None,
            amount: None,
            payment_status: None,
            created_at: now,
            updated_at: now,
        };

        self.lock()?.insert(booking.id, booking.clone());
        Ok(Some(CreatedBooking {
            booking,
            package_title,
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, StoreError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn find_by_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<Option<Booking>, StoreError> {
        Ok(self
            .lock()?
            .values()
            .find(|b| b.stripe_payment_intent_id.as_deref() == Some(intent_id))
            .cloned())
    }

    async fn record_checkout_session(
        &self,
        id: Uuid,
        session_id: &str,
        amount: Decimal,
    ) -> Result<Option<Booking>, StoreError> {
        let mut rows = self.lock()?;
        let Some(booking) = rows.get_mut(&id) else {
            return Ok(None);
        };
        booking.stripe_session_id = Some(session_id.to_string());
        booking.amount = Some(amount);
        booking.updated_at = Utc::now();
        Ok(Some(booking.clone()))
    }

    async fn record_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        payment_intent_id: Option<&str>,
    ) -> Result<Option<Booking>, StoreError> {
        let mut rows = self.lock()?;
        let Some(booking) = rows.get_mut(&id) else {
            return Ok(None);
        };
        booking.payment_status = Some(status);
        if let Some(intent_id) = payment_intent_id {
            booking.stripe_payment_intent_id = Some(intent_id.to_string());
        }
        booking.updated_at = Utc::now();
        Ok(Some(booking.clone()))
    }
}
