pub mod payment;
pub mod repository;

pub use payment::{CheckoutProvider, CheckoutSession, CheckoutSessionSpec, ProviderError};
pub use repository::{BookingRepository, CatalogRepository, CreatedBooking, StoreError};
