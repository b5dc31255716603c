//! Public handlers: health, drive listings, inventory overview,
//! emergency board

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::http::error::AppError;
use crate::http::handlers::Pagination;
use crate::http::state::AppState;
use crate::models::drive::BloodDrive;
use crate::models::inventory::InventorySummary;
use crate::models::request::BloodRequest;
use crate::services::drive::DriveDetail;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: crate::NAME,
        version: crate::VERSION,
    })
}

/// GET /v1/drives
pub async fn list_drives(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<BloodDrive>>, AppError> {
    let (limit, offset) = pagination.limits();
    let drives = state
        .services
        .drive_service
        .list_upcoming(limit, offset)
        .await?;

    Ok(Json(drives))
}

/// GET /v1/drives/{id}
pub async fn drive_detail(
    State(state): State<AppState>,
    Path(drive_id): Path<i64>,
) -> Result<Json<DriveDetail>, AppError> {
    let detail = state.services.drive_service.drive_detail(drive_id).await?;
    Ok(Json(detail))
}

/// GET /v1/inventory
pub async fn inventory_overview(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventorySummary>>, AppError> {
    let overview = state.services.inventory_service.overview().await?;
    Ok(Json(overview))
}

/// GET /v1/requests/urgent
pub async fn urgent_requests(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<BloodRequest>>, AppError> {
    let (limit, offset) = pagination.limits();
    let requests = state
        .services
        .request_service
        .urgent_requests(limit, offset)
        .await?;

    Ok(Json(requests))
}
