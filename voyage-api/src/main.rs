use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voyage_api::{app, AppState};
use voyage_core::payment::CheckoutProvider;
use voyage_core::repository::{BookingRepository, CatalogRepository};
use voyage_notify::{LogMailer, Mailer, SenderProfile};
use voyage_payments::{CheckoutService, StripeClient, StripeConfig, WebhookReconciler};
use voyage_store::{DbClient, PgBookingRepository, PgCatalogRepository};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voyage_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = voyage_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Voyage API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let catalog: Arc<dyn CatalogRepository> = Arc::new(PgCatalogRepository::new(db.pool.clone()));
    let bookings: Arc<dyn BookingRepository> = Arc::new(PgBookingRepository::new(db.pool.clone()));

    let provider: Arc<dyn CheckoutProvider> = Arc::new(StripeClient::new(StripeConfig {
        secret_key: config.stripe.secret_key.clone(),
        webhook_secret: config.stripe.webhook_secret.clone(),
        api_base_url: config.stripe.api_base_url.clone(),
        currency: config.stripe.currency.clone(),
        timeout_seconds: config.stripe.timeout_seconds,
    }));
    if !provider.is_configured() {
        tracing::warn!("Stripe secret key is not set; checkout endpoints will answer as unavailable");
    }

    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);
    let sender = SenderProfile {
        site_name: config.site.name.clone(),
        noreply_email: config.site.noreply_email.clone(),
        operator_email: config.site.operator_email.clone(),
    };

    let checkout = Arc::new(CheckoutService::new(
        catalog.clone(),
        bookings.clone(),
        provider.clone(),
        config.site.base_url.clone(),
    ));
    let reconciler = Arc::new(WebhookReconciler::new(
        bookings.clone(),
        catalog.clone(),
        provider.clone(),
        mailer.clone(),
        sender.clone(),
    ));

    let app_state = AppState {
        catalog,
        bookings,
        provider,
        mailer,
        sender,
        checkout,
        reconciler,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
