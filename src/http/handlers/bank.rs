//! Blood bank handlers: dashboard, inventory management and the drive
//! lifecycle

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::handlers::Pagination;
use crate::http::state::AppState;
use crate::middleware::auth::BankUser;
use crate::models::donation::{Donation, DonationStatus};
use crate::models::drive::{BloodDrive, DriveRegistration, UpdateDriveRequest};
use crate::models::inventory::BloodInventory;
use crate::models::user::User;
use crate::services::drive::{DriveDetail, OrganizerDriveStats};
use crate::services::inventory::BankStock;

/// Drive creation payload, shared with the admin surface
#[derive(Debug, Clone, Deserialize)]
pub struct NewDrive {
    pub title: String,
    pub location: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub target_donors: i32,
    #[serde(default)]
    pub blood_types_needed: Vec<String>,
    pub requirements: Option<String>,
    pub notes: Option<String>,
}

pub(crate) async fn create_drive_for(
    state: &AppState,
    organizer: &User,
    payload: NewDrive,
) -> Result<BloodDrive, AppError> {
    let drive = state
        .services
        .drive_service
        .create_drive(
            organizer,
            payload.title,
            payload.location,
            payload.description,
            payload.start_date,
            payload.end_date,
            payload.target_donors,
            payload.blood_types_needed,
            payload.requirements,
            payload.notes,
        )
        .await?;

    Ok(drive)
}

#[derive(Debug, Serialize)]
pub struct BankDashboard {
    #[serde(flatten)]
    pub stock: BankStock,
    pub recent_donations: Vec<Donation>,
    #[serde(flatten)]
    pub drives: OrganizerDriveStats,
}

/// GET /v1/bank/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    BankUser(bank): BankUser,
) -> Result<Json<BankDashboard>, AppError> {
    let stock = state.services.inventory_service.bank_stock(bank.id).await?;
    let recent_donations = state
        .db
        .donations
        .list_recent_by_status(DonationStatus::Accepted.as_str(), 7, 5)
        .await?;
    let drives = state.services.drive_service.organizer_stats(bank.id).await?;

    Ok(Json(BankDashboard {
        stock,
        recent_donations,
        drives,
    }))
}

/// GET /v1/bank/inventory
pub async fn inventory(
    State(state): State<AppState>,
    BankUser(bank): BankUser,
) -> Result<Json<BankStock>, AppError> {
    let stock = state.services.inventory_service.bank_stock(bank.id).await?;
    Ok(Json(stock))
}

#[derive(Debug, Deserialize)]
pub struct SetInventoryPayload {
    pub blood_type: String,
    pub units_available: i32,
}

/// PUT /v1/bank/inventory
pub async fn set_inventory(
    State(state): State<AppState>,
    BankUser(bank): BankUser,
    Json(payload): Json<SetInventoryPayload>,
) -> Result<Json<BloodInventory>, AppError> {
    let entry = state
        .services
        .inventory_service
        .set_units(bank.id, &payload.blood_type, payload.units_available)
        .await?;

    Ok(Json(entry))
}

/// GET /v1/bank/drives
pub async fn list_drives(
    State(state): State<AppState>,
    BankUser(bank): BankUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<BloodDrive>>, AppError> {
    let (limit, offset) = pagination.limits();
    let drives = state
        .services
        .drive_service
        .organizer_drives(bank.id, limit, offset)
        .await?;

    Ok(Json(drives))
}

/// POST /v1/bank/drives
pub async fn create_drive(
    State(state): State<AppState>,
    BankUser(bank): BankUser,
    Json(payload): Json<NewDrive>,
) -> Result<(StatusCode, Json<BloodDrive>), AppError> {
    let drive = create_drive_for(&state, &bank, payload).await?;
    Ok((StatusCode::CREATED, Json(drive)))
}

#[derive(Debug, Serialize)]
pub struct OrganizerDriveDetail {
    #[serde(flatten)]
    pub detail: DriveDetail,
    pub registrations: Vec<DriveRegistration>,
}

/// GET /v1/bank/drives/{id}
pub async fn drive_detail(
    State(state): State<AppState>,
    BankUser(bank): BankUser,
    Path(drive_id): Path<i64>,
) -> Result<Json<OrganizerDriveDetail>, AppError> {
    let registrations = state
        .services
        .drive_service
        .list_registrations(&bank, drive_id)
        .await?;
    let detail = state.services.drive_service.drive_detail(drive_id).await?;

    Ok(Json(OrganizerDriveDetail {
        detail,
        registrations,
    }))
}

/// PUT /v1/bank/drives/{id}
pub async fn update_drive(
    State(state): State<AppState>,
    BankUser(bank): BankUser,
    Path(drive_id): Path<i64>,
    Json(update): Json<UpdateDriveRequest>,
) -> Result<Json<BloodDrive>, AppError> {
    let drive = state
        .services
        .drive_service
        .update_drive(&bank, drive_id, update)
        .await?;

    Ok(Json(drive))
}

/// DELETE /v1/bank/drives/{id}
pub async fn delete_drive(
    State(state): State<AppState>,
    BankUser(bank): BankUser,
    Path(drive_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .services
        .drive_service
        .delete_drive(&bank, drive_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/bank/registrations/{id}/confirm
pub async fn confirm_registration(
    State(state): State<AppState>,
    BankUser(bank): BankUser,
    Path(registration_id): Path<i64>,
) -> Result<Json<DriveRegistration>, AppError> {
    let registration = state
        .services
        .drive_service
        .confirm_registration(&bank, registration_id)
        .await?;

    Ok(Json(registration))
}
