//! Admin handlers: approval workflow, drive administration, account
//! management and system statistics

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::http::error::AppError;
use crate::http::handlers::bank::{create_drive_for, NewDrive};
use crate::http::handlers::Pagination;
use crate::http::state::AppState;
use crate::middleware::auth::AdminUser;
use crate::models::donation::Donation;
use crate::models::drive::{BloodDrive, UpdateDriveRequest};
use crate::models::request::BloodRequest;
use crate::models::user::User;
use crate::services::approval::AdminDashboard;

#[derive(Debug, Default, Deserialize)]
pub struct DecisionPayload {
    pub admin_notes: Option<String>,
}

/// GET /v1/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<AdminDashboard>, AppError> {
    let dashboard = state.services.approval_service.dashboard().await?;
    Ok(Json(dashboard))
}

/// GET /v1/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let stats = state.services.approval_service.system_stats().await?;
    Ok(Json(stats))
}

/// POST /v1/admin/requests/{id}/accept
pub async fn accept_request(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(request_id): Path<i64>,
    payload: Option<Json<DecisionPayload>>,
) -> Result<Json<BloodRequest>, AppError> {
    let notes = payload.and_then(|Json(p)| p.admin_notes);
    let request = state
        .services
        .approval_service
        .accept_request(admin.id, request_id, notes)
        .await?;

    Ok(Json(request))
}

/// POST /v1/admin/requests/{id}/reject
pub async fn reject_request(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(request_id): Path<i64>,
    payload: Option<Json<DecisionPayload>>,
) -> Result<Json<BloodRequest>, AppError> {
    let notes = payload.and_then(|Json(p)| p.admin_notes);
    let request = state
        .services
        .approval_service
        .reject_request(admin.id, request_id, notes)
        .await?;

    Ok(Json(request))
}

/// POST /v1/admin/requests/{id}/fulfill
pub async fn fulfill_request(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(request_id): Path<i64>,
) -> Result<Json<BloodRequest>, AppError> {
    let request = state
        .services
        .approval_service
        .fulfill_request(admin.id, request_id)
        .await?;

    Ok(Json(request))
}

/// POST /v1/admin/donations/{id}/accept
pub async fn accept_donation(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(donation_id): Path<i64>,
    payload: Option<Json<DecisionPayload>>,
) -> Result<Json<Donation>, AppError> {
    let notes = payload.and_then(|Json(p)| p.admin_notes);
    let donation = state
        .services
        .approval_service
        .accept_donation(admin.id, donation_id, notes)
        .await?;

    Ok(Json(donation))
}

/// POST /v1/admin/donations/{id}/reject
pub async fn reject_donation(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(donation_id): Path<i64>,
    payload: Option<Json<DecisionPayload>>,
) -> Result<Json<Donation>, AppError> {
    let notes = payload.and_then(|Json(p)| p.admin_notes);
    let donation = state
        .services
        .approval_service
        .reject_donation(admin.id, donation_id, notes)
        .await?;

    Ok(Json(donation))
}

/// POST /v1/admin/donations/{id}/complete
pub async fn complete_donation(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(donation_id): Path<i64>,
) -> Result<Json<Donation>, AppError> {
    let donation = state
        .services
        .approval_service
        .complete_donation(admin.id, donation_id)
        .await?;

    Ok(Json(donation))
}

/// POST /v1/admin/drives
pub async fn create_drive(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<NewDrive>,
) -> Result<(StatusCode, Json<BloodDrive>), AppError> {
    let drive = create_drive_for(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(drive)))
}

/// PUT /v1/admin/drives/{id}
pub async fn update_drive(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(drive_id): Path<i64>,
    Json(update): Json<UpdateDriveRequest>,
) -> Result<Json<BloodDrive>, AppError> {
    let drive = state
        .services
        .drive_service
        .update_drive(&admin, drive_id, update)
        .await?;

    Ok(Json(drive))
}

/// DELETE /v1/admin/drives/{id}
pub async fn delete_drive(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(drive_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .services
        .drive_service
        .delete_drive(&admin, drive_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<User>>, AppError> {
    let (limit, offset) = pagination.limits();
    let users = state.services.user_service.list_users(limit, offset).await?;

    Ok(Json(users))
}

/// POST /v1/admin/users/{id}/activate
pub async fn activate_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = state
        .services
        .user_service
        .set_active_status(admin.id, user_id, true)
        .await?;

    Ok(Json(user))
}

/// POST /v1/admin/users/{id}/deactivate
pub async fn deactivate_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = state
        .services
        .user_service
        .set_active_status(admin.id, user_id, false)
        .await?;

    Ok(Json(user))
}
