use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use voyage_catalog::Package;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/packages", get(list_packages))
        .route("/v1/packages/{slug}", get(get_package))
}

/// GET /v1/packages
async fn list_packages(State(state): State<AppState>) -> Result<Json<Vec<Package>>, AppError> {
    let packages = state
        .catalog
        .list_packages()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(packages))
}

/// GET /v1/packages/{slug}
async fn get_package(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Package>, AppError> {
    let package = state
        .catalog
        .package_by_slug(&slug)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Package not found".to_string()))?;
    Ok(Json(package))
}
