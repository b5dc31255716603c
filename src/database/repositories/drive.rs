//! Blood drive repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::drive::{
    BloodDrive, CreateDriveRequest, DriveRegistration, RegisterForDriveRequest, UpdateDriveRequest,
};
use crate::utils::errors::LifelinkError;

const DRIVE_COLUMNS: &str = "id, organizer_id, title, location, description, start_date, end_date, target_donors, blood_types_needed, requirements, notes, status, created_at";
const REGISTRATION_COLUMNS: &str = "id, donor_id, drive_id, registration_date, status, notes";

#[derive(Debug, Clone)]
pub struct DriveRepository {
    pool: PgPool,
}

impl DriveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new blood drive in SCHEDULED state
    pub async fn create(&self, request: CreateDriveRequest) -> Result<BloodDrive, LifelinkError> {
        let drive = sqlx::query_as::<_, BloodDrive>(&format!(
            r#"
            INSERT INTO blood_drives (organizer_id, title, location, description, start_date, end_date, target_donors, blood_types_needed, requirements, notes, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'SCHEDULED', $11)
            RETURNING {DRIVE_COLUMNS}
            "#
        ))
        .bind(request.organizer_id)
        .bind(request.title)
        .bind(request.location)
        .bind(request.description)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.target_donors)
        .bind(request.blood_types_needed)
        .bind(request.requirements)
        .bind(request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(drive)
    }

    /// Find drive by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<BloodDrive>, LifelinkError> {
        let drive = sqlx::query_as::<_, BloodDrive>(&format!(
            "SELECT {DRIVE_COLUMNS} FROM blood_drives WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(drive)
    }

    /// Update drive fields
    pub async fn update(
        &self,
        id: i64,
        request: UpdateDriveRequest,
    ) -> Result<BloodDrive, LifelinkError> {
        let drive = sqlx::query_as::<_, BloodDrive>(&format!(
            r#"
            UPDATE blood_drives
            SET title = COALESCE($2, title),
                location = COALESCE($3, location),
                description = COALESCE($4, description),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                target_donors = COALESCE($7, target_donors),
                blood_types_needed = COALESCE($8, blood_types_needed),
                requirements = COALESCE($9, requirements),
                notes = COALESCE($10, notes),
                status = COALESCE($11, status)
            WHERE id = $1
            RETURNING {DRIVE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.location)
        .bind(request.description)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.target_donors)
        .bind(request.blood_types_needed)
        .bind(request.requirements)
        .bind(request.notes)
        .bind(request.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(drive)
    }

    /// Delete a drive and its registrations
    pub async fn delete(&self, id: i64) -> Result<(), LifelinkError> {
        sqlx::query("DELETE FROM drive_registrations WHERE drive_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM blood_drives WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Upcoming scheduled drives, soonest first
    pub async fn list_upcoming(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BloodDrive>, LifelinkError> {
        let drives = sqlx::query_as::<_, BloodDrive>(&format!(
            "SELECT {DRIVE_COLUMNS} FROM blood_drives WHERE start_date > NOW() AND status = 'SCHEDULED' ORDER BY start_date ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(drives)
    }

    /// Drives organized by a given user, newest first
    pub async fn list_by_organizer(
        &self,
        organizer_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BloodDrive>, LifelinkError> {
        let drives = sqlx::query_as::<_, BloodDrive>(&format!(
            "SELECT {DRIVE_COLUMNS} FROM blood_drives WHERE organizer_id = $1 ORDER BY start_date DESC LIMIT $2 OFFSET $3"
        ))
        .bind(organizer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(drives)
    }

    /// List all drives, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<BloodDrive>, LifelinkError> {
        let drives = sqlx::query_as::<_, BloodDrive>(&format!(
            "SELECT {DRIVE_COLUMNS} FROM blood_drives ORDER BY start_date DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(drives)
    }

    /// Count drives organized by a given user
    pub async fn count_by_organizer(&self, organizer_id: i64) -> Result<i64, LifelinkError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM blood_drives WHERE organizer_id = $1")
                .bind(organizer_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    /// Count an organizer's upcoming drives
    pub async fn count_upcoming_by_organizer(
        &self,
        organizer_id: i64,
    ) -> Result<i64, LifelinkError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM blood_drives WHERE organizer_id = $1 AND start_date > NOW() AND status = 'SCHEDULED'",
        )
        .bind(organizer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Count total drives
    pub async fn count(&self) -> Result<i64, LifelinkError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blood_drives")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Register a donor for a drive
    pub async fn register_donor(
        &self,
        request: RegisterForDriveRequest,
    ) -> Result<DriveRegistration, LifelinkError> {
        let registration = sqlx::query_as::<_, DriveRegistration>(&format!(
            r#"
            INSERT INTO drive_registrations (donor_id, drive_id, registration_date, status, notes)
            VALUES ($1, $2, $3, 'REGISTERED', $4)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(request.donor_id)
        .bind(request.drive_id)
        .bind(Utc::now())
        .bind(request.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Find a donor's registration for a drive
    pub async fn find_registration(
        &self,
        donor_id: i64,
        drive_id: i64,
    ) -> Result<Option<DriveRegistration>, LifelinkError> {
        let registration = sqlx::query_as::<_, DriveRegistration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM drive_registrations WHERE donor_id = $1 AND drive_id = $2"
        ))
        .bind(donor_id)
        .bind(drive_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Find registration by ID
    pub async fn find_registration_by_id(
        &self,
        id: i64,
    ) -> Result<Option<DriveRegistration>, LifelinkError> {
        let registration = sqlx::query_as::<_, DriveRegistration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM drive_registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Update a registration's status
    pub async fn set_registration_status(
        &self,
        id: i64,
        status: &str,
    ) -> Result<DriveRegistration, LifelinkError> {
        let registration = sqlx::query_as::<_, DriveRegistration>(&format!(
            "UPDATE drive_registrations SET status = $2 WHERE id = $1 RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Registrations for a drive, oldest first
    pub async fn list_registrations(
        &self,
        drive_id: i64,
    ) -> Result<Vec<DriveRegistration>, LifelinkError> {
        let registrations = sqlx::query_as::<_, DriveRegistration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM drive_registrations WHERE drive_id = $1 ORDER BY registration_date ASC"
        ))
        .bind(drive_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Count non-cancelled registrations for a drive
    pub async fn registration_count(&self, drive_id: i64) -> Result<i64, LifelinkError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM drive_registrations WHERE drive_id = $1 AND status <> 'CANCELLED'",
        )
        .bind(drive_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Drives a donor holds a non-cancelled registration for, soonest first
    pub async fn list_registered_drives(
        &self,
        donor_id: i64,
    ) -> Result<Vec<BloodDrive>, LifelinkError> {
        let drives = sqlx::query_as::<_, BloodDrive>(
            r#"
            SELECT d.id, d.organizer_id, d.title, d.location, d.description, d.start_date, d.end_date, d.target_donors, d.blood_types_needed, d.requirements, d.notes, d.status, d.created_at
            FROM blood_drives d
            INNER JOIN drive_registrations r ON d.id = r.drive_id
            WHERE r.donor_id = $1 AND r.status <> 'CANCELLED'
            ORDER BY d.start_date ASC
            "#,
        )
        .bind(donor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(drives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drive_repository_creation() {
        let pool = PgPool::connect("postgresql://test").await;
        if let Ok(pool) = pool {
            let repo = DriveRepository::new(pool);
            assert!(!repo.pool.is_closed());
        }
    }
}
