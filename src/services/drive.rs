//! Blood drive service implementation
//!
//! Drive lifecycle for organizers, the public drive listing, and donor
//! registrations.

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::database::repositories::{DonationRepository, DriveRepository};
use crate::services::notification::NotificationService;
use crate::models::drive::{
    BloodDrive, CreateDriveRequest, DrivePhase, DriveRegistration, DriveStatus,
    RegisterForDriveRequest, RegistrationStatus, UpdateDriveRequest,
};
use crate::models::user::{Role, User};
use crate::models::BloodType;
use crate::utils::errors::{LifelinkError, Result};

/// Drive detail enriched with live counters
#[derive(Debug, Clone, Serialize)]
pub struct DriveDetail {
    pub drive: BloodDrive,
    pub phase: DrivePhase,
    pub days_remaining: Option<i64>,
    pub registration_count: i64,
    pub donation_count: i64,
    pub progress_percentage: u32,
}

/// Organizer dashboard counters
#[derive(Debug, Clone, Serialize)]
pub struct OrganizerDriveStats {
    pub total_drives: i64,
    pub upcoming_drives: i64,
    pub recent_drives: Vec<BloodDrive>,
}

/// Drive service for drive and registration operations
#[derive(Clone)]
pub struct DriveService {
    drive_repository: DriveRepository,
    donation_repository: DonationRepository,
    notifications: NotificationService,
}

impl DriveService {
    /// Create a new DriveService instance
    pub fn new(
        drive_repository: DriveRepository,
        donation_repository: DonationRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            drive_repository,
            donation_repository,
            notifications,
        }
    }

    fn validate_drive_fields(
        title: &str,
        start_date: chrono::DateTime<Utc>,
        end_date: chrono::DateTime<Utc>,
        target_donors: i32,
        blood_types_needed: &[String],
    ) -> Result<Vec<String>> {
        if title.trim().is_empty() {
            return Err(LifelinkError::InvalidInput(
                "Drive title is required".to_string(),
            ));
        }
        if end_date <= start_date {
            return Err(LifelinkError::InvalidInput(
                "Drive end date must be after the start date".to_string(),
            ));
        }
        if target_donors < 1 {
            return Err(LifelinkError::InvalidInput(
                "Target donors must be at least 1".to_string(),
            ));
        }

        let mut normalized = Vec::with_capacity(blood_types_needed.len());
        for raw in blood_types_needed {
            let bt = raw.parse::<BloodType>()?;
            let value = bt.as_str().to_string();
            if !normalized.contains(&value) {
                normalized.push(value);
            }
        }

        Ok(normalized)
    }

    /// Whether a user may manage a given drive
    fn can_manage(user: &User, drive: &BloodDrive) -> Result<bool> {
        Ok(match user.role()? {
            Role::Admin => true,
            Role::BloodBank => drive.organizer_id == user.id,
            _ => false,
        })
    }

    /// Schedule a new drive
    pub async fn create_drive(
        &self,
        organizer: &User,
        title: String,
        location: String,
        description: Option<String>,
        start_date: chrono::DateTime<Utc>,
        end_date: chrono::DateTime<Utc>,
        target_donors: i32,
        blood_types_needed: Vec<String>,
        requirements: Option<String>,
        notes: Option<String>,
    ) -> Result<BloodDrive> {
        if !crate::services::auth::AuthService::can_manage_drives(organizer)? {
            return Err(LifelinkError::PermissionDenied(
                "Only blood banks and admins can schedule drives".to_string(),
            ));
        }

        let blood_types_needed = Self::validate_drive_fields(
            &title,
            start_date,
            end_date,
            target_donors,
            &blood_types_needed,
        )?;

        let drive = self
            .drive_repository
            .create(CreateDriveRequest {
                organizer_id: organizer.id,
                title,
                location,
                description,
                start_date,
                end_date,
                target_donors,
                blood_types_needed,
                requirements,
                notes,
            })
            .await?;

        info!(organizer_id = organizer.id, drive_id = drive.id, "Blood drive scheduled");
        Ok(drive)
    }

    /// Update a drive
    pub async fn update_drive(
        &self,
        actor: &User,
        drive_id: i64,
        mut update: UpdateDriveRequest,
    ) -> Result<BloodDrive> {
        let drive = self.get_drive(drive_id).await?;

        if !Self::can_manage(actor, &drive)? {
            return Err(LifelinkError::PermissionDenied(
                "Drives can only be edited by their organizer or an admin".to_string(),
            ));
        }

        let title = update.title.clone().unwrap_or_else(|| drive.title.clone());
        let start = update.start_date.unwrap_or(drive.start_date);
        let end = update.end_date.unwrap_or(drive.end_date);
        let target = update.target_donors.unwrap_or(drive.target_donors);
        let types = update
            .blood_types_needed
            .clone()
            .unwrap_or_else(|| drive.blood_types_needed.clone());
        update.blood_types_needed =
            Some(Self::validate_drive_fields(&title, start, end, target, &types)?);

        if let Some(ref raw) = update.status {
            update.status = Some(raw.parse::<DriveStatus>()?.as_str().to_string());
        }

        let drive = self.drive_repository.update(drive_id, update).await?;
        debug!(actor_id = actor.id, drive_id = drive_id, "Blood drive updated");

        Ok(drive)
    }

    /// Cancel a drive
    pub async fn cancel_drive(&self, actor: &User, drive_id: i64) -> Result<BloodDrive> {
        let update = UpdateDriveRequest {
            status: Some(DriveStatus::Cancelled.as_str().to_string()),
            ..Default::default()
        };
        let drive = self.get_drive(drive_id).await?;

        if !Self::can_manage(actor, &drive)? {
            return Err(LifelinkError::PermissionDenied(
                "Drives can only be cancelled by their organizer or an admin".to_string(),
            ));
        }

        let drive = self.drive_repository.update(drive_id, update).await?;
        info!(actor_id = actor.id, drive_id = drive_id, "Blood drive cancelled");

        Ok(drive)
    }

    /// Delete a drive and its registrations
    pub async fn delete_drive(&self, actor: &User, drive_id: i64) -> Result<()> {
        let drive = self.get_drive(drive_id).await?;

        if !Self::can_manage(actor, &drive)? {
            return Err(LifelinkError::PermissionDenied(
                "Drives can only be deleted by their organizer or an admin".to_string(),
            ));
        }

        self.drive_repository.delete(drive_id).await?;
        info!(actor_id = actor.id, drive_id = drive_id, "Blood drive deleted");

        Ok(())
    }

    /// Find a drive or fail
    pub async fn get_drive(&self, drive_id: i64) -> Result<BloodDrive> {
        self.drive_repository
            .find_by_id(drive_id)
            .await?
            .ok_or(LifelinkError::DriveNotFound { drive_id })
    }

    /// Upcoming drives for the public listing
    pub async fn list_upcoming(&self, limit: i64, offset: i64) -> Result<Vec<BloodDrive>> {
        self.drive_repository.list_upcoming(limit, offset).await
    }

    /// Drive detail with live counters
    pub async fn drive_detail(&self, drive_id: i64) -> Result<DriveDetail> {
        let drive = self.get_drive(drive_id).await?;
        let now = Utc::now();

        let registration_count = self.drive_repository.registration_count(drive_id).await?;
        let donation_count = self.donation_repository.count_by_drive(drive_id).await?;

        Ok(DriveDetail {
            phase: drive.phase(now),
            days_remaining: drive.days_remaining(now),
            progress_percentage: drive.progress_percentage(donation_count),
            registration_count,
            donation_count,
            drive,
        })
    }

    /// Register a donor for a drive
    pub async fn register_donor(
        &self,
        donor: &User,
        drive_id: i64,
        notes: Option<String>,
    ) -> Result<DriveRegistration> {
        let drive = self.get_drive(drive_id).await?;

        if drive.status()? != DriveStatus::Scheduled {
            return Err(LifelinkError::InvalidInput(
                "Registrations are only open for scheduled drives".to_string(),
            ));
        }
        if drive.phase(Utc::now()) == DrivePhase::Finished {
            return Err(LifelinkError::InvalidInput(
                "This blood drive has already ended".to_string(),
            ));
        }

        if let Some(existing) = self
            .drive_repository
            .find_registration(donor.id, drive_id)
            .await?
        {
            if existing.status()? != RegistrationStatus::Cancelled {
                return Err(LifelinkError::AlreadyRegistered { drive_id });
            }
            // A cancelled registration can be re-activated
            let registration = self
                .drive_repository
                .set_registration_status(existing.id, RegistrationStatus::Registered.as_str())
                .await?;
            info!(donor_id = donor.id, drive_id = drive_id, "Drive registration re-activated");
            return Ok(registration);
        }

        let registration = self
            .drive_repository
            .register_donor(RegisterForDriveRequest {
                donor_id: donor.id,
                drive_id,
                notes,
            })
            .await?;

        info!(donor_id = donor.id, drive_id = drive_id, "Donor registered for drive");
        Ok(registration)
    }

    /// Cancel the donor's own registration
    pub async fn cancel_registration(
        &self,
        donor_id: i64,
        registration_id: i64,
    ) -> Result<DriveRegistration> {
        let registration = self
            .drive_repository
            .find_registration_by_id(registration_id)
            .await?
            .ok_or(LifelinkError::RegistrationNotFound { registration_id })?;

        if registration.donor_id != donor_id {
            return Err(LifelinkError::PermissionDenied(
                "Registrations can only be cancelled by their donor".to_string(),
            ));
        }

        let registration = self
            .drive_repository
            .set_registration_status(registration_id, RegistrationStatus::Cancelled.as_str())
            .await?;

        info!(donor_id = donor_id, registration_id = registration_id, "Drive registration cancelled");
        Ok(registration)
    }

    /// Organizer confirms a donor's registration
    pub async fn confirm_registration(
        &self,
        actor: &User,
        registration_id: i64,
    ) -> Result<DriveRegistration> {
        let registration = self
            .drive_repository
            .find_registration_by_id(registration_id)
            .await?
            .ok_or(LifelinkError::RegistrationNotFound { registration_id })?;

        let drive = self.get_drive(registration.drive_id).await?;
        if !Self::can_manage(actor, &drive)? {
            return Err(LifelinkError::PermissionDenied(
                "Registrations can only be confirmed by the drive organizer or an admin"
                    .to_string(),
            ));
        }

        if registration.status()? != RegistrationStatus::Registered {
            return Err(LifelinkError::InvalidStateTransition {
                from: registration.status.clone(),
                to: RegistrationStatus::Confirmed.to_string(),
            });
        }

        let registration = self
            .drive_repository
            .set_registration_status(registration_id, RegistrationStatus::Confirmed.as_str())
            .await?;

        self.notifications
            .notify(
                registration.donor_id,
                "registration.confirmed",
                &HashMap::from([("title".to_string(), drive.title.clone())]),
            )
            .await?;

        info!(actor_id = actor.id, registration_id = registration_id, "Drive registration confirmed");
        Ok(registration)
    }

    /// Registrations for a drive, visible to its organizer or an admin
    pub async fn list_registrations(
        &self,
        actor: &User,
        drive_id: i64,
    ) -> Result<Vec<DriveRegistration>> {
        let drive = self.get_drive(drive_id).await?;

        if !Self::can_manage(actor, &drive)? {
            return Err(LifelinkError::PermissionDenied(
                "Registrations are only visible to the drive organizer or an admin".to_string(),
            ));
        }

        self.drive_repository.list_registrations(drive_id).await
    }

    /// An organizer's drives, newest first
    pub async fn organizer_drives(
        &self,
        organizer_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BloodDrive>> {
        self.drive_repository
            .list_by_organizer(organizer_id, limit, offset)
            .await
    }

    /// Organizer dashboard counters
    pub async fn organizer_stats(&self, organizer_id: i64) -> Result<OrganizerDriveStats> {
        Ok(OrganizerDriveStats {
            total_drives: self.drive_repository.count_by_organizer(organizer_id).await?,
            upcoming_drives: self
                .drive_repository
                .count_upcoming_by_organizer(organizer_id)
                .await?,
            recent_drives: self
                .drive_repository
                .list_by_organizer(organizer_id, 5, 0)
                .await?,
        })
    }
}
