use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod checkout;
pub mod contact;
pub mod destinations;
pub mod error;
pub mod packages;
pub mod state;
pub mod webhooks;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // The site frontend is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .merge(bookings::routes())
        .merge(contact::routes())
        .merge(checkout::routes())
        .merge(webhooks::routes())
        .merge(destinations::routes())
        .merge(packages::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
