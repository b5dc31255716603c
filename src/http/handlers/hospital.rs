//! Hospital handlers: dashboard and the blood request workflow

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::http::error::AppError;
use crate::http::handlers::Pagination;
use crate::http::state::AppState;
use crate::middleware::auth::HospitalUser;
use crate::models::donation::Donation;
use crate::models::request::{BloodRequest, UpdateBloodRequest};
use crate::services::request::{HospitalDashboard, NewBloodRequest};

/// GET /v1/hospital/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    HospitalUser(hospital): HospitalUser,
) -> Result<Json<HospitalDashboard>, AppError> {
    let dashboard = state.services.request_service.dashboard(hospital.id).await?;
    Ok(Json(dashboard))
}

/// GET /v1/hospital/requests
pub async fn list_requests(
    State(state): State<AppState>,
    HospitalUser(hospital): HospitalUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<BloodRequest>>, AppError> {
    let (limit, offset) = pagination.limits();
    let requests = state
        .services
        .request_service
        .list_requests(hospital.id, limit, offset)
        .await?;

    Ok(Json(requests))
}

/// POST /v1/hospital/requests
pub async fn create_request(
    State(state): State<AppState>,
    HospitalUser(hospital): HospitalUser,
    Json(payload): Json<NewBloodRequest>,
) -> Result<(StatusCode, Json<BloodRequest>), AppError> {
    let request = state
        .services
        .request_service
        .create_request(hospital.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

#[derive(Debug, Serialize)]
pub struct RequestDetail {
    pub request: BloodRequest,
    pub donations: Vec<Donation>,
}

/// GET /v1/hospital/requests/{id}
pub async fn request_detail(
    State(state): State<AppState>,
    HospitalUser(hospital): HospitalUser,
    Path(request_id): Path<i64>,
) -> Result<Json<RequestDetail>, AppError> {
    let request = state
        .services
        .request_service
        .get_request(hospital.id, request_id)
        .await?;
    let donations = state.db.donations.list_by_request(request_id).await?;

    Ok(Json(RequestDetail { request, donations }))
}

/// PUT /v1/hospital/requests/{id}
pub async fn update_request(
    State(state): State<AppState>,
    HospitalUser(hospital): HospitalUser,
    Path(request_id): Path<i64>,
    Json(update): Json<UpdateBloodRequest>,
) -> Result<Json<BloodRequest>, AppError> {
    let request = state
        .services
        .request_service
        .update_request(hospital.id, request_id, update)
        .await?;

    Ok(Json(request))
}

/// POST /v1/hospital/requests/{id}/cancel
pub async fn cancel_request(
    State(state): State<AppState>,
    HospitalUser(hospital): HospitalUser,
    Path(request_id): Path<i64>,
) -> Result<Json<BloodRequest>, AppError> {
    let request = state
        .services
        .request_service
        .cancel_request(hospital.id, request_id)
        .await?;

    Ok(Json(request))
}
