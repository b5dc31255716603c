//! Blood request service implementation
//!
//! Hospital-side request workflow: creation against current availability,
//! pending-only updates and cancellation, and the hospital dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::database::repositories::{InventoryRepository, RequestRepository};
use crate::models::request::{BloodRequest, CreateBloodRequest, RequestStatus, UpdateBloodRequest};
use crate::models::{BloodType, Priority};
use crate::utils::errors::{LifelinkError, Result};

/// Payload accepted when a hospital raises a request
#[derive(Debug, Clone, Deserialize)]
pub struct NewBloodRequest {
    pub blood_type: String,
    pub units_needed: i32,
    pub priority: String,
    pub patient_details: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Hospital dashboard payload
#[derive(Debug, Clone, Serialize)]
pub struct HospitalDashboard {
    pub pending_requests: Vec<BloodRequest>,
    pub accepted_requests: Vec<BloodRequest>,
    pub rejected_requests: Vec<BloodRequest>,
    pub fulfilled_requests: Vec<BloodRequest>,
}

/// Request service for hospital-side operations
#[derive(Clone)]
pub struct RequestService {
    request_repository: RequestRepository,
    inventory_repository: InventoryRepository,
}

impl RequestService {
    /// Create a new RequestService instance
    pub fn new(
        request_repository: RequestRepository,
        inventory_repository: InventoryRepository,
    ) -> Self {
        Self {
            request_repository,
            inventory_repository,
        }
    }

    /// Raise a new blood request for admin review.
    ///
    /// Submission is refused when the requested type is not currently held in
    /// sufficient quantity anywhere; the authoritative check happens again at
    /// acceptance time.
    pub async fn create_request(
        &self,
        hospital_id: i64,
        payload: NewBloodRequest,
    ) -> Result<BloodRequest> {
        let blood_type = payload.blood_type.parse::<BloodType>()?;
        let priority = payload.priority.parse::<Priority>()?;

        if payload.units_needed < 1 {
            return Err(LifelinkError::InvalidInput(
                "Units needed must be at least 1".to_string(),
            ));
        }

        let available = self
            .inventory_repository
            .total_units(blood_type.as_str())
            .await?;
        if available < payload.units_needed as i64 {
            warn!(
                hospital_id = hospital_id,
                blood_type = %blood_type,
                requested = payload.units_needed,
                available = available,
                "Request refused for lack of stock"
            );
            return Err(LifelinkError::InsufficientInventory {
                blood_type: blood_type.as_str().to_string(),
                requested: payload.units_needed,
                available: available as i32,
            });
        }

        let request = self
            .request_repository
            .create(CreateBloodRequest {
                hospital_id,
                blood_type: blood_type.as_str().to_string(),
                units_needed: payload.units_needed,
                priority: priority.as_str().to_string(),
                patient_details: payload.patient_details,
                deadline: payload.deadline,
            })
            .await?;

        info!(
            hospital_id = hospital_id,
            request_id = request.id,
            blood_type = %blood_type,
            priority = %priority,
            "Blood request created"
        );

        Ok(request)
    }

    /// A hospital's own request, for the detail view
    pub async fn get_request(&self, hospital_id: i64, request_id: i64) -> Result<BloodRequest> {
        let request = self
            .request_repository
            .find_by_id(request_id)
            .await?
            .ok_or(LifelinkError::RequestNotFound { request_id })?;

        if request.hospital_id != hospital_id {
            return Err(LifelinkError::PermissionDenied(
                "Requests are only visible to the raising hospital".to_string(),
            ));
        }

        Ok(request)
    }

    /// Update a pending request
    pub async fn update_request(
        &self,
        hospital_id: i64,
        request_id: i64,
        mut update: UpdateBloodRequest,
    ) -> Result<BloodRequest> {
        let request = self.get_request(hospital_id, request_id).await?;

        let status = request.status()?;
        if status != RequestStatus::Pending {
            return Err(LifelinkError::InvalidInput(format!(
                "Cannot update a request in {} state",
                status
            )));
        }

        if let Some(units) = update.units_needed {
            if units < 1 {
                return Err(LifelinkError::InvalidInput(
                    "Units needed must be at least 1".to_string(),
                ));
            }
        }
        if let Some(ref raw) = update.priority {
            update.priority = Some(raw.parse::<Priority>()?.as_str().to_string());
        }

        let request = self.request_repository.update(request_id, update).await?;
        debug!(hospital_id = hospital_id, request_id = request_id, "Request updated");

        Ok(request)
    }

    /// Cancel a pending request
    pub async fn cancel_request(&self, hospital_id: i64, request_id: i64) -> Result<BloodRequest> {
        let request = self.get_request(hospital_id, request_id).await?;

        let status = request.status()?;
        if !status.can_transition_to(RequestStatus::Cancelled) {
            return Err(LifelinkError::InvalidStateTransition {
                from: status.to_string(),
                to: RequestStatus::Cancelled.to_string(),
            });
        }

        let request = self
            .request_repository
            .set_status(request_id, RequestStatus::Cancelled.as_str(), None)
            .await?;

        info!(hospital_id = hospital_id, request_id = request_id, "Request cancelled");
        Ok(request)
    }

    /// A hospital's requests, newest first
    pub async fn list_requests(
        &self,
        hospital_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BloodRequest>> {
        self.request_repository
            .list_by_hospital(hospital_id, limit, offset)
            .await
    }

    /// Pending CRITICAL/HIGH requests for the public emergency board
    pub async fn urgent_requests(&self, limit: i64, offset: i64) -> Result<Vec<BloodRequest>> {
        self.request_repository.list_urgent_pending(limit, offset).await
    }

    /// Assemble the hospital dashboard
    pub async fn dashboard(&self, hospital_id: i64) -> Result<HospitalDashboard> {
        let pending_requests = self
            .request_repository
            .list_by_hospital_and_status(hospital_id, RequestStatus::Pending.as_str(), 50)
            .await?;
        let accepted_requests = self
            .request_repository
            .list_by_hospital_and_status(hospital_id, RequestStatus::Accepted.as_str(), 50)
            .await?;
        let rejected_requests = self
            .request_repository
            .list_by_hospital_and_status(hospital_id, RequestStatus::Rejected.as_str(), 50)
            .await?;
        let fulfilled_requests = self
            .request_repository
            .list_by_hospital_and_status(hospital_id, RequestStatus::Fulfilled.as_str(), 5)
            .await?;

        Ok(HospitalDashboard {
            pending_requests,
            accepted_requests,
            rejected_requests,
            fulfilled_requests,
        })
    }
}
