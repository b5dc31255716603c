//! Admin approval workflow
//!
//! The one place where status changes have side effects: accepting a request
//! debits inventory, accepting a donation credits it, completing a donation
//! stamps the donor's last donation date.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::database::repositories::{
    DonationRepository, DriveRepository, InventoryRepository, RequestRepository, UserRepository,
};
use crate::models::donation::{Donation, DonationStatus};
use crate::models::drive::BloodDrive;
use crate::models::request::{BloodRequest, RequestStatus};
use crate::services::notification::NotificationService;
use crate::utils::errors::{LifelinkError, Result};
use crate::utils::logging::{log_admin_decision, log_inventory_change};

/// Admin dashboard payload
#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub pending_requests: Vec<BloodRequest>,
    pub pending_donations: Vec<Donation>,
    pub recent_requests: Vec<BloodRequest>,
    pub recent_donations: Vec<Donation>,
    pub recent_drives: Vec<BloodDrive>,
    pub total_donors: i64,
}

/// Approval service for admin decisions over requests and donations
#[derive(Clone)]
pub struct ApprovalService {
    request_repository: RequestRepository,
    donation_repository: DonationRepository,
    inventory_repository: InventoryRepository,
    user_repository: UserRepository,
    drive_repository: DriveRepository,
    notifications: NotificationService,
}

impl ApprovalService {
    /// Create a new ApprovalService instance
    pub fn new(
        request_repository: RequestRepository,
        donation_repository: DonationRepository,
        inventory_repository: InventoryRepository,
        user_repository: UserRepository,
        drive_repository: DriveRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            request_repository,
            donation_repository,
            inventory_repository,
            user_repository,
            drive_repository,
            notifications,
        }
    }

    async fn load_request(&self, request_id: i64) -> Result<BloodRequest> {
        self.request_repository
            .find_by_id(request_id)
            .await?
            .ok_or(LifelinkError::RequestNotFound { request_id })
    }

    async fn load_donation(&self, donation_id: i64) -> Result<Donation> {
        self.donation_repository
            .find_by_id(donation_id)
            .await?
            .ok_or(LifelinkError::DonationNotFound { donation_id })
    }

    fn request_params(request: &BloodRequest) -> HashMap<String, String> {
        HashMap::from([
            ("units".to_string(), request.units_needed.to_string()),
            ("blood_type".to_string(), request.blood_type.clone()),
        ])
    }

    fn donation_params(donation: &Donation) -> HashMap<String, String> {
        HashMap::from([
            ("units".to_string(), donation.units.to_string()),
            ("blood_type".to_string(), donation.blood_type.clone()),
        ])
    }

    /// Accept a pending blood request, debiting inventory.
    ///
    /// Inventory must hold enough units of the requested type before the
    /// status changes; an under-stocked accept fails without mutating
    /// anything.
    pub async fn accept_request(
        &self,
        admin_id: i64,
        request_id: i64,
        admin_notes: Option<String>,
    ) -> Result<BloodRequest> {
        let request = self.load_request(request_id).await?;

        let status = request.status()?;
        if !status.can_transition_to(RequestStatus::Accepted) {
            return Err(LifelinkError::InvalidStateTransition {
                from: status.to_string(),
                to: RequestStatus::Accepted.to_string(),
            });
        }

        let entry = self
            .inventory_repository
            .find_best_stocked(&request.blood_type)
            .await?
            .filter(|e| e.units_available >= request.units_needed)
            .ok_or_else(|| {
                warn!(
                    admin_id = admin_id,
                    request_id = request_id,
                    blood_type = %request.blood_type,
                    "Accept refused for lack of stock"
                );
                LifelinkError::InsufficientInventory {
                    blood_type: request.blood_type.clone(),
                    requested: request.units_needed,
                    available: 0,
                }
            })?;

        let debited = self
            .inventory_repository
            .adjust_units(entry.id, -request.units_needed)
            .await?
            .ok_or(LifelinkError::InsufficientInventory {
                blood_type: request.blood_type.clone(),
                requested: request.units_needed,
                available: entry.units_available,
            })?;

        log_inventory_change(
            debited.blood_bank_id,
            &debited.blood_type,
            -request.units_needed,
            debited.units_available,
        );

        let request = self
            .request_repository
            .set_status(request_id, RequestStatus::Accepted.as_str(), admin_notes)
            .await?;

        log_admin_decision(admin_id, "blood_request", request_id, "accept");
        self.notifications
            .notify(
                request.hospital_id,
                "request.accepted",
                &Self::request_params(&request),
            )
            .await?;

        Ok(request)
    }

    /// Reject a pending blood request
    pub async fn reject_request(
        &self,
        admin_id: i64,
        request_id: i64,
        admin_notes: Option<String>,
    ) -> Result<BloodRequest> {
        let request = self.load_request(request_id).await?;

        let status = request.status()?;
        if !status.can_transition_to(RequestStatus::Rejected) {
            return Err(LifelinkError::InvalidStateTransition {
                from: status.to_string(),
                to: RequestStatus::Rejected.to_string(),
            });
        }

        let request = self
            .request_repository
            .set_status(request_id, RequestStatus::Rejected.as_str(), admin_notes)
            .await?;

        log_admin_decision(admin_id, "blood_request", request_id, "reject");
        self.notifications
            .notify(
                request.hospital_id,
                "request.rejected",
                &Self::request_params(&request),
            )
            .await?;

        Ok(request)
    }

    /// Mark an accepted request fulfilled once the hospital has received
    /// its units
    pub async fn fulfill_request(&self, admin_id: i64, request_id: i64) -> Result<BloodRequest> {
        let request = self.load_request(request_id).await?;

        let status = request.status()?;
        if !status.can_transition_to(RequestStatus::Fulfilled) {
            return Err(LifelinkError::InvalidStateTransition {
                from: status.to_string(),
                to: RequestStatus::Fulfilled.to_string(),
            });
        }

        let request = self
            .request_repository
            .set_status(request_id, RequestStatus::Fulfilled.as_str(), None)
            .await?;

        log_admin_decision(admin_id, "blood_request", request_id, "fulfill");
        self.notifications
            .notify(
                request.hospital_id,
                "request.fulfilled",
                &Self::request_params(&request),
            )
            .await?;

        Ok(request)
    }

    /// Accept a pending donation, crediting inventory.
    ///
    /// When no bank stocks the donated type yet, a fresh inventory row is
    /// created under the first active blood bank; the accept fails when the
    /// system has no blood bank at all.
    pub async fn accept_donation(
        &self,
        admin_id: i64,
        donation_id: i64,
        admin_notes: Option<String>,
    ) -> Result<Donation> {
        let donation = self.load_donation(donation_id).await?;

        let status = donation.status()?;
        if !status.can_transition_to(DonationStatus::Accepted) {
            return Err(LifelinkError::InvalidStateTransition {
                from: status.to_string(),
                to: DonationStatus::Accepted.to_string(),
            });
        }

        match self
            .inventory_repository
            .find_best_stocked(&donation.blood_type)
            .await?
        {
            Some(entry) => {
                let credited = self
                    .inventory_repository
                    .adjust_units(entry.id, donation.units)
                    .await?
                    .ok_or_else(|| {
                        LifelinkError::ServiceUnavailable(
                            "Inventory credit failed".to_string(),
                        )
                    })?;
                log_inventory_change(
                    credited.blood_bank_id,
                    &credited.blood_type,
                    donation.units,
                    credited.units_available,
                );
            }
            None => {
                let bank = self
                    .user_repository
                    .find_first_blood_bank()
                    .await?
                    .ok_or(LifelinkError::NoBloodBank)?;
                let created = self
                    .inventory_repository
                    .set_units(bank.id, &donation.blood_type, donation.units)
                    .await?;
                log_inventory_change(
                    bank.id,
                    &created.blood_type,
                    donation.units,
                    created.units_available,
                );
            }
        }

        let donation = self
            .donation_repository
            .set_status(donation_id, DonationStatus::Accepted.as_str(), admin_notes)
            .await?;

        log_admin_decision(admin_id, "donation", donation_id, "accept");
        self.notifications
            .notify(
                donation.donor_id,
                "donation.accepted",
                &Self::donation_params(&donation),
            )
            .await?;

        Ok(donation)
    }

    /// Reject a pending donation
    pub async fn reject_donation(
        &self,
        admin_id: i64,
        donation_id: i64,
        admin_notes: Option<String>,
    ) -> Result<Donation> {
        let donation = self.load_donation(donation_id).await?;

        let status = donation.status()?;
        if !status.can_transition_to(DonationStatus::Rejected) {
            return Err(LifelinkError::InvalidStateTransition {
                from: status.to_string(),
                to: DonationStatus::Rejected.to_string(),
            });
        }

        let donation = self
            .donation_repository
            .set_status(donation_id, DonationStatus::Rejected.as_str(), admin_notes)
            .await?;

        log_admin_decision(admin_id, "donation", donation_id, "reject");
        self.notifications
            .notify(
                donation.donor_id,
                "donation.rejected",
                &Self::donation_params(&donation),
            )
            .await?;

        Ok(donation)
    }

    /// Mark an accepted donation completed, stamping the donor's last
    /// donation date
    pub async fn complete_donation(&self, admin_id: i64, donation_id: i64) -> Result<Donation> {
        let donation = self.load_donation(donation_id).await?;

        let status = donation.status()?;
        if !status.can_transition_to(DonationStatus::Completed) {
            return Err(LifelinkError::InvalidStateTransition {
                from: status.to_string(),
                to: DonationStatus::Completed.to_string(),
            });
        }

        let donation = self
            .donation_repository
            .set_status(donation_id, DonationStatus::Completed.as_str(), None)
            .await?;

        self.user_repository
            .set_last_donation_date(donation.donor_id, donation.donation_date)
            .await?;

        log_admin_decision(admin_id, "donation", donation_id, "complete");
        self.notifications
            .notify(
                donation.donor_id,
                "donation.completed",
                &Self::donation_params(&donation),
            )
            .await?;

        Ok(donation)
    }

    /// Assemble the admin dashboard
    pub async fn dashboard(&self) -> Result<AdminDashboard> {
        let pending_requests = self
            .request_repository
            .list_by_status(RequestStatus::Pending.as_str(), 50, 0)
            .await?;
        let pending_donations = self
            .donation_repository
            .list_by_status(DonationStatus::Pending.as_str(), 50, 0)
            .await?;
        let recent_requests = self.request_repository.list(20, 0).await?;
        let recent_donations = self.donation_repository.list(20, 0).await?;
        let recent_drives = self.drive_repository.list(10, 0).await?;
        let total_donors = self.user_repository.count_by_role("donor").await?;

        Ok(AdminDashboard {
            pending_requests,
            pending_donations,
            recent_requests,
            recent_donations,
            recent_drives,
            total_donors,
        })
    }

    /// System-wide counters for the admin stats endpoint
    pub async fn system_stats(&self) -> Result<serde_json::Value> {
        let mut request_counts = HashMap::new();
        for status in [
            RequestStatus::Pending,
            RequestStatus::Accepted,
            RequestStatus::Rejected,
            RequestStatus::Fulfilled,
            RequestStatus::Cancelled,
        ] {
            request_counts.insert(
                status.as_str(),
                self.request_repository.count_by_status(status.as_str()).await?,
            );
        }

        let mut donation_counts = HashMap::new();
        for status in [
            DonationStatus::Pending,
            DonationStatus::Accepted,
            DonationStatus::Rejected,
            DonationStatus::Completed,
            DonationStatus::Cancelled,
        ] {
            donation_counts.insert(
                status.as_str(),
                self.donation_repository.count_by_status(status.as_str()).await?,
            );
        }

        let stats = serde_json::json!({
            "users": {
                "total": self.user_repository.count().await?,
                "donors": self.user_repository.count_by_role("donor").await?,
                "hospitals": self.user_repository.count_by_role("hospital").await?,
                "blood_banks": self.user_repository.count_by_role("blood_bank").await?,
            },
            "requests": {
                "total": self.request_repository.count().await?,
                "by_status": request_counts,
            },
            "donations": {
                "total": self.donation_repository.count().await?,
                "by_status": donation_counts,
            },
            "drives": {
                "total": self.drive_repository.count().await?,
            },
            "inventory": self.inventory_repository.summary().await?,
            "notifications": self.notifications.stats(),
        });

        Ok(stats)
    }
}
