//! Donor handlers: dashboard, donation history, scheduling, drive
//! registrations

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::http::error::AppError;
use crate::http::handlers::Pagination;
use crate::http::state::AppState;
use crate::middleware::auth::DonorUser;
use crate::models::donation::Donation;
use crate::models::drive::DriveRegistration;
use crate::services::donation::{DonorDashboard, NewDonation};

/// GET /v1/donor/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    DonorUser(donor): DonorUser,
) -> Result<Json<DonorDashboard>, AppError> {
    let dashboard = state.services.donation_service.dashboard(donor.id).await?;
    Ok(Json(dashboard))
}

/// GET /v1/donor/donations
pub async fn donation_history(
    State(state): State<AppState>,
    DonorUser(donor): DonorUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Donation>>, AppError> {
    let (limit, offset) = pagination.limits();
    let donations = state
        .services
        .donation_service
        .donation_history(donor.id, limit, offset)
        .await?;

    Ok(Json(donations))
}

/// POST /v1/donor/donations
pub async fn submit_donation(
    State(state): State<AppState>,
    DonorUser(donor): DonorUser,
    Json(payload): Json<NewDonation>,
) -> Result<(StatusCode, Json<Donation>), AppError> {
    let donation = state
        .services
        .donation_service
        .submit_donation(&donor, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(donation)))
}

/// POST /v1/donor/donations/{id}/cancel
pub async fn cancel_donation(
    State(state): State<AppState>,
    DonorUser(donor): DonorUser,
    Path(donation_id): Path<i64>,
) -> Result<Json<Donation>, AppError> {
    let donation = state
        .services
        .donation_service
        .cancel_donation(donor.id, donation_id)
        .await?;

    Ok(Json(donation))
}

#[derive(Debug, Default, Deserialize)]
pub struct DriveRegistrationPayload {
    pub notes: Option<String>,
}

/// POST /v1/donor/drives/{id}/register
pub async fn register_for_drive(
    State(state): State<AppState>,
    DonorUser(donor): DonorUser,
    Path(drive_id): Path<i64>,
    payload: Option<Json<DriveRegistrationPayload>>,
) -> Result<(StatusCode, Json<DriveRegistration>), AppError> {
    let notes = payload.and_then(|Json(p)| p.notes);
    let registration = state
        .services
        .drive_service
        .register_donor(&donor, drive_id, notes)
        .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// POST /v1/donor/registrations/{id}/cancel
pub async fn cancel_registration(
    State(state): State<AppState>,
    DonorUser(donor): DonorUser,
    Path(registration_id): Path<i64>,
) -> Result<Json<DriveRegistration>, AppError> {
    let registration = state
        .services
        .drive_service
        .cancel_registration(donor.id, registration_id)
        .await?;

    Ok(Json(registration))
}
