use std::sync::Arc;

use voyage_core::payment::CheckoutProvider;
use voyage_core::repository::{BookingRepository, CatalogRepository};
use voyage_notify::{Mailer, SenderProfile};
use voyage_payments::{CheckoutService, WebhookReconciler};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub provider: Arc<dyn CheckoutProvider>,
    pub mailer: Arc<dyn Mailer>,
    pub sender: SenderProfile,
    pub checkout: Arc<CheckoutService>,
    pub reconciler: Arc<WebhookReconciler>,
}
