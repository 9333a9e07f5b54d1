//! Shared test harness: router over in-memory repositories and the
//! mock payment provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use rust_decimal_macros::dec;
use uuid::Uuid;

use voyage_api::{app, AppState};
use voyage_catalog::{Destination, Package};
use voyage_core::payment::CheckoutProvider;
use voyage_core::repository::{BookingRepository, CatalogRepository};
use voyage_notify::{DeliveryResult, EmailMessage, Mailer, NotifyError, SenderProfile};
use voyage_payments::{CheckoutService, MockCheckoutProvider, WebhookReconciler};
use voyage_store::{MemoryBookingRepository, MemoryCatalogRepository};

pub struct CountingMailer {
    sent: AtomicUsize,
}

impl CountingMailer {
    pub fn deliveries(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for CountingMailer {
    async fn send(&self, _message: &EmailMessage) -> Result<DeliveryResult, NotifyError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(DeliveryResult::Logged)
    }
}

pub struct TestContext {
    pub app: Router,
    pub bookings: Arc<MemoryBookingRepository>,
    pub package: Package,
    pub destination: Destination,
    pub mailer: Arc<CountingMailer>,
}

pub fn context() -> TestContext {
    context_with_provider(MockCheckoutProvider::default())
}

pub fn context_with_provider(provider: MockCheckoutProvider) -> TestContext {
    let destination = Destination {
        id: Uuid::new_v4(),
        slug: "lisbon".to_string(),
        name: "Lisbon".to_string(),
        description: "Tiled facades, Atlantic light and custard tarts.".to_string(),
        created_at: Utc::now(),
    };
    let package = Package {
        id: Uuid::new_v4(),
        slug: "lisbon-coastal-escape".to_string(),
        title: "Lisbon Coastal Escape".to_string(),
        description: "Five days along the Atlantic coast.".to_string(),
        images: vec!["https://images.example.com/lisbon.jpg".to_string()],
        price: dec!(1899.99),
        duration_days: 5,
        highlights: vec!["Sintra day trip".to_string()],
        destination_id: Some(destination.id),
        created_at: Utc::now(),
    };

    let catalog: Arc<dyn CatalogRepository> = Arc::new(MemoryCatalogRepository::new(
        vec![destination.clone()],
        vec![package.clone()],
    ));
    let bookings = Arc::new(MemoryBookingRepository::new(std::slice::from_ref(&package)));
    let provider: Arc<dyn CheckoutProvider> = Arc::new(provider);
    let mailer = Arc::new(CountingMailer {
        sent: AtomicUsize::new(0),
    });
    let sender = SenderProfile {
        site_name: "Voyage Travel".to_string(),
        noreply_email: "noreply@voyage.test".to_string(),
        operator_email: "bookings@voyage.test".to_string(),
    };

    let checkout = Arc::new(CheckoutService::new(
        catalog.clone(),
        bookings.clone() as Arc<dyn BookingRepository>,
        provider.clone(),
        "http://localhost:3000".to_string(),
    ));
    let reconciler = Arc::new(WebhookReconciler::new(
        bookings.clone() as Arc<dyn BookingRepository>,
        catalog.clone(),
        provider.clone(),
        mailer.clone() as Arc<dyn Mailer>,
        sender.clone(),
    ));

    let state = AppState {
        catalog,
        bookings: bookings.clone() as Arc<dyn BookingRepository>,
        provider,
        mailer: mailer.clone() as Arc<dyn Mailer>,
        sender,
        checkout,
        reconciler,
    };

    TestContext {
        app: app(state),
        bookings,
        package,
        destination,
        mailer,
    }
}

pub fn form_post(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn webhook_post(body: serde_json::Value, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/v1/webhooks/payments/stripe")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("stripe-signature", signature);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
