//! Blood request repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::request::{BloodRequest, CreateBloodRequest, UpdateBloodRequest};
use crate::utils::errors::LifelinkError;

const REQUEST_COLUMNS: &str = "id, hospital_id, blood_type, units_needed, priority, status, patient_details, admin_notes, deadline, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new blood request in PENDING state
    pub async fn create(&self, request: CreateBloodRequest) -> Result<BloodRequest, LifelinkError> {
        let row = sqlx::query_as::<_, BloodRequest>(&format!(
            r#"
            INSERT INTO blood_requests (hospital_id, blood_type, units_needed, priority, status, patient_details, deadline, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'PENDING', $5, $6, $7, $7)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(request.hospital_id)
        .bind(request.blood_type)
        .bind(request.units_needed)
        .bind(request.priority)
        .bind(request.patient_details)
        .bind(request.deadline)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Find request by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<BloodRequest>, LifelinkError> {
        let row = sqlx::query_as::<_, BloodRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Update the mutable fields of a request
    pub async fn update(
        &self,
        id: i64,
        request: UpdateBloodRequest,
    ) -> Result<BloodRequest, LifelinkError> {
        let row = sqlx::query_as::<_, BloodRequest>(&format!(
            r#"
            UPDATE blood_requests
            SET units_needed = COALESCE($2, units_needed),
                priority = COALESCE($3, priority),
                patient_details = COALESCE($4, patient_details),
                deadline = COALESCE($5, deadline),
                updated_at = $6
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.units_needed)
        .bind(request.priority)
        .bind(request.patient_details)
        .bind(request.deadline)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Set request status, optionally recording admin notes
    pub async fn set_status(
        &self,
        id: i64,
        status: &str,
        admin_notes: Option<String>,
    ) -> Result<BloodRequest, LifelinkError> {
        let row = sqlx::query_as::<_, BloodRequest>(&format!(
            r#"
            UPDATE blood_requests
            SET status = $2, admin_notes = COALESCE($3, admin_notes), updated_at = $4
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(admin_notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// List requests raised by a hospital, newest first
    pub async fn list_by_hospital(
        &self,
        hospital_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BloodRequest>, LifelinkError> {
        let rows = sqlx::query_as::<_, BloodRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE hospital_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(hospital_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// List a hospital's requests in a given status, newest first
    pub async fn list_by_hospital_and_status(
        &self,
        hospital_id: i64,
        status: &str,
        limit: i64,
    ) -> Result<Vec<BloodRequest>, LifelinkError> {
        let rows = sqlx::query_as::<_, BloodRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE hospital_id = $1 AND status = $2 ORDER BY created_at DESC LIMIT $3"
        ))
        .bind(hospital_id)
        .bind(status)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// List all requests in a given status, newest first
    pub async fn list_by_status(
        &self,
        status: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BloodRequest>, LifelinkError> {
        let rows = sqlx::query_as::<_, BloodRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE status = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Pending CRITICAL/HIGH requests for the public emergency board
    pub async fn list_urgent_pending(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BloodRequest>, LifelinkError> {
        let rows = sqlx::query_as::<_, BloodRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE status = 'PENDING' AND priority IN ('CRITICAL', 'HIGH') ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// List all requests, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<BloodRequest>, LifelinkError> {
        let rows = sqlx::query_as::<_, BloodRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Count requests in a given status
    pub async fn count_by_status(&self, status: &str) -> Result<i64, LifelinkError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blood_requests WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count total requests
    pub async fn count(&self) -> Result<i64, LifelinkError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blood_requests")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_repository_creation() {
        let pool = PgPool::connect("postgresql://test").await;
        if let Ok(pool) = pool {
            let repo = RequestRepository::new(pool);
            assert!(!repo.pool.is_closed());
        }
    }
}
