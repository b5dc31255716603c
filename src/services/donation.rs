//! Donation service implementation
//!
//! Donor-side donation workflow: scheduling against the eligibility interval,
//! walk-in recording, cancellation and the donor dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::database::repositories::{DonationRepository, DriveRepository};
use crate::models::donation::{CreateDonationRequest, Donation, DonationStatus};
use crate::models::drive::BloodDrive;
use crate::models::user::User;
use crate::models::BloodType;
use crate::utils::errors::{LifelinkError, Result};

/// Payload accepted when a donor schedules or records a donation
#[derive(Debug, Clone, Deserialize)]
pub struct NewDonation {
    pub donation_date: DateTime<Utc>,
    /// Defaults to the donor's profile blood type
    pub blood_type: Option<String>,
    pub units: Option<i32>,
    pub notes: Option<String>,
    pub drive_id: Option<i64>,
    pub request_id: Option<i64>,
}

/// Donor dashboard payload
#[derive(Debug, Clone, Serialize)]
pub struct DonorDashboard {
    pub pending_donations: Vec<Donation>,
    pub accepted_donations: Vec<Donation>,
    pub rejected_donations: Vec<Donation>,
    pub recent_completed_donations: Vec<Donation>,
    pub registered_drives: Vec<BloodDrive>,
}

/// Days a donor still has to wait before `proposed` is an eligible donation
/// date, given their last completed donation. None means eligible.
pub fn wait_days_remaining(
    last_completed: Option<DateTime<Utc>>,
    proposed: DateTime<Utc>,
    min_interval_days: i64,
) -> Option<i64> {
    let last = last_completed?;
    let elapsed = (proposed - last).num_days();
    if elapsed >= min_interval_days {
        None
    } else {
        Some(min_interval_days - elapsed)
    }
}

/// Donation service for donor-side operations
#[derive(Clone)]
pub struct DonationService {
    donation_repository: DonationRepository,
    drive_repository: DriveRepository,
    settings: Settings,
}

impl DonationService {
    /// Create a new DonationService instance
    pub fn new(
        donation_repository: DonationRepository,
        drive_repository: DriveRepository,
        settings: Settings,
    ) -> Self {
        Self {
            donation_repository,
            drive_repository,
            settings,
        }
    }

    /// Schedule or record a donation for admin review
    pub async fn submit_donation(&self, donor: &User, payload: NewDonation) -> Result<Donation> {
        debug!(donor_id = donor.id, "Submitting donation");

        let blood_type_raw = payload
            .blood_type
            .or_else(|| donor.blood_type.clone())
            .ok_or_else(|| {
                LifelinkError::InvalidInput(
                    "Blood type is required when the donor profile has none".to_string(),
                )
            })?;
        let blood_type = blood_type_raw.parse::<BloodType>()?;

        let units = payload.units.unwrap_or(1);
        if units < 1 {
            return Err(LifelinkError::InvalidInput(
                "Units must be at least 1".to_string(),
            ));
        }

        // Eligibility gate: donors must rest between completed donations
        let last_completed = self
            .donation_repository
            .find_last_completed(donor.id)
            .await?
            .map(|d| d.donation_date)
            .or(donor.last_donation_date);

        if let Some(days_remaining) = wait_days_remaining(
            last_completed,
            payload.donation_date,
            self.settings.donation.min_interval_days,
        ) {
            return Err(LifelinkError::DonorNotEligible { days_remaining });
        }

        if let Some(drive_id) = payload.drive_id {
            self.drive_repository
                .find_by_id(drive_id)
                .await?
                .ok_or(LifelinkError::DriveNotFound { drive_id })?;
        }

        let donation = self
            .donation_repository
            .create(CreateDonationRequest {
                donor_id: donor.id,
                drive_id: payload.drive_id,
                request_id: payload.request_id,
                donation_date: payload.donation_date,
                blood_type: blood_type.as_str().to_string(),
                units,
                notes: payload.notes,
            })
            .await?;

        info!(
            donor_id = donor.id,
            donation_id = donation.id,
            blood_type = %blood_type,
            "Donation submitted for review"
        );

        Ok(donation)
    }

    /// Cancel one of the donor's own pending donations
    pub async fn cancel_donation(&self, donor_id: i64, donation_id: i64) -> Result<Donation> {
        let donation = self
            .donation_repository
            .find_by_id(donation_id)
            .await?
            .ok_or(LifelinkError::DonationNotFound { donation_id })?;

        if donation.donor_id != donor_id {
            return Err(LifelinkError::PermissionDenied(
                "Donations can only be cancelled by their donor".to_string(),
            ));
        }

        let status = donation.status()?;
        if !status.can_transition_to(DonationStatus::Cancelled) {
            return Err(LifelinkError::InvalidStateTransition {
                from: status.to_string(),
                to: DonationStatus::Cancelled.to_string(),
            });
        }

        let donation = self
            .donation_repository
            .set_status(donation_id, DonationStatus::Cancelled.as_str(), None)
            .await?;

        info!(donor_id = donor_id, donation_id = donation_id, "Donation cancelled");
        Ok(donation)
    }

    /// A donor's donation history, newest first
    pub async fn donation_history(
        &self,
        donor_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Donation>> {
        self.donation_repository
            .list_by_donor(donor_id, limit, offset)
            .await
    }

    /// Assemble the donor dashboard
    pub async fn dashboard(&self, donor_id: i64) -> Result<DonorDashboard> {
        let pending_donations = self
            .donation_repository
            .list_by_donor_and_status(donor_id, DonationStatus::Pending.as_str(), 50)
            .await?;
        let accepted_donations = self
            .donation_repository
            .list_by_donor_and_status(donor_id, DonationStatus::Accepted.as_str(), 50)
            .await?;
        let rejected_donations = self
            .donation_repository
            .list_by_donor_and_status(donor_id, DonationStatus::Rejected.as_str(), 50)
            .await?;
        let recent_completed_donations = self
            .donation_repository
            .list_by_donor_and_status(donor_id, DonationStatus::Completed.as_str(), 5)
            .await?;
        let registered_drives = self.drive_repository.list_registered_drives(donor_id).await?;

        Ok(DonorDashboard {
            pending_donations,
            accepted_donations,
            rejected_donations,
            recent_completed_donations,
            registered_drives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_first_donation_is_eligible() {
        assert_eq!(wait_days_remaining(None, Utc::now(), 56), None);
    }

    #[test]
    fn test_donation_after_interval_is_eligible() {
        let now = Utc::now();
        let last = now - Duration::days(56);
        assert_eq!(wait_days_remaining(Some(last), now, 56), None);

        let last = now - Duration::days(120);
        assert_eq!(wait_days_remaining(Some(last), now, 56), None);
    }

    #[test]
    fn test_donation_within_interval_is_blocked() {
        let now = Utc::now();
        let last = now - Duration::days(10);
        assert_eq!(wait_days_remaining(Some(last), now, 56), Some(46));

        let last = now - Duration::days(55);
        assert_eq!(wait_days_remaining(Some(last), now, 56), Some(1));
    }

    #[test]
    fn test_future_scheduling_counts_toward_interval() {
        let now = Utc::now();
        let last = now - Duration::days(30);
        let proposed = now + Duration::days(26);
        assert_eq!(wait_days_remaining(Some(last), proposed, 56), None);

        let proposed = now + Duration::days(20);
        assert_eq!(wait_days_remaining(Some(last), proposed, 56), Some(6));
    }
}
