//! Donation repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::donation::{CreateDonationRequest, Donation};
use crate::utils::errors::LifelinkError;

const DONATION_COLUMNS: &str = "id, donor_id, drive_id, request_id, donation_date, blood_type, units, status, notes, admin_notes, created_at";

#[derive(Debug, Clone)]
pub struct DonationRepository {
    pool: PgPool,
}

impl DonationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new donation in PENDING state
    pub async fn create(&self, request: CreateDonationRequest) -> Result<Donation, LifelinkError> {
        let donation = sqlx::query_as::<_, Donation>(&format!(
            r#"
            INSERT INTO donations (donor_id, drive_id, request_id, donation_date, blood_type, units, status, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'PENDING', $7, $8)
            RETURNING {DONATION_COLUMNS}
            "#
        ))
        .bind(request.donor_id)
        .bind(request.drive_id)
        .bind(request.request_id)
        .bind(request.donation_date)
        .bind(request.blood_type)
        .bind(request.units)
        .bind(request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(donation)
    }

    /// Find donation by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Donation>, LifelinkError> {
        let donation = sqlx::query_as::<_, Donation>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(donation)
    }

    /// Set donation status, optionally recording admin notes
    pub async fn set_status(
        &self,
        id: i64,
        status: &str,
        admin_notes: Option<String>,
    ) -> Result<Donation, LifelinkError> {
        let donation = sqlx::query_as::<_, Donation>(&format!(
            r#"
            UPDATE donations
            SET status = $2, admin_notes = COALESCE($3, admin_notes)
            WHERE id = $1
            RETURNING {DONATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(admin_notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(donation)
    }

    /// List a donor's donations, newest first
    pub async fn list_by_donor(
        &self,
        donor_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Donation>, LifelinkError> {
        let donations = sqlx::query_as::<_, Donation>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE donor_id = $1 ORDER BY donation_date DESC LIMIT $2 OFFSET $3"
        ))
        .bind(donor_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(donations)
    }

    /// List a donor's donations in a given status, newest first
    pub async fn list_by_donor_and_status(
        &self,
        donor_id: i64,
        status: &str,
        limit: i64,
    ) -> Result<Vec<Donation>, LifelinkError> {
        let donations = sqlx::query_as::<_, Donation>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE donor_id = $1 AND status = $2 ORDER BY donation_date DESC LIMIT $3"
        ))
        .bind(donor_id)
        .bind(status)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(donations)
    }

    /// Donations linked to a blood request, oldest first
    pub async fn list_by_request(&self, request_id: i64) -> Result<Vec<Donation>, LifelinkError> {
        let donations = sqlx::query_as::<_, Donation>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE request_id = $1 ORDER BY donation_date ASC"
        ))
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(donations)
    }

    /// Most recent COMPLETED donation for a donor. Drives the eligibility
    /// interval check.
    pub async fn find_last_completed(
        &self,
        donor_id: i64,
    ) -> Result<Option<Donation>, LifelinkError> {
        let donation = sqlx::query_as::<_, Donation>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE donor_id = $1 AND status = 'COMPLETED' ORDER BY donation_date DESC LIMIT 1"
        ))
        .bind(donor_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(donation)
    }

    /// List all donations in a given status, newest first
    pub async fn list_by_status(
        &self,
        status: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Donation>, LifelinkError> {
        let donations = sqlx::query_as::<_, Donation>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE status = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(donations)
    }

    /// Donations in a given status within the last `days` days
    pub async fn list_recent_by_status(
        &self,
        status: &str,
        days: i64,
        limit: i64,
    ) -> Result<Vec<Donation>, LifelinkError> {
        let donations = sqlx::query_as::<_, Donation>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE status = $1 AND donation_date > NOW() - make_interval(days => $2::int) ORDER BY donation_date DESC LIMIT $3"
        ))
        .bind(status)
        .bind(days)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(donations)
    }

    /// List all donations, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Donation>, LifelinkError> {
        let donations = sqlx::query_as::<_, Donation>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(donations)
    }

    /// Count donations linked to a drive
    pub async fn count_by_drive(&self, drive_id: i64) -> Result<i64, LifelinkError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM donations WHERE drive_id = $1")
            .bind(drive_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count donations in a given status
    pub async fn count_by_status(&self, status: &str) -> Result<i64, LifelinkError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM donations WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count total donations
    pub async fn count(&self) -> Result<i64, LifelinkError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM donations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_donation_repository_creation() {
        let pool = PgPool::connect("postgresql://test").await;
        if let Ok(pool) = pool {
            let repo = DonationRepository::new(pool);
            assert!(!repo.pool.is_closed());
        }
    }
}
