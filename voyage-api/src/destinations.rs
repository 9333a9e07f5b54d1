use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use voyage_catalog::{Destination, Package};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DestinationDetail {
    #[serde(flatten)]
    destination: Destination,
    packages: Vec<Package>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/destinations", get(list_destinations))
        .route("/v1/destinations/{slug}", get(get_destination))
}

/// GET /v1/destinations
async fn list_destinations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Destination>>, AppError> {
    let destinations = state
        .catalog
        .list_destinations()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(destinations))
}

/// GET /v1/destinations/{slug}
/// A destination together with its packages.
async fn get_destination(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DestinationDetail>, AppError> {
    let destination = state
        .catalog
        .destination_by_slug(&slug)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Destination not found".to_string()))?;

    let packages = state
        .catalog
        .packages_for_destination(destination.id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(DestinationDetail {
        destination,
        packages,
    }))
}
