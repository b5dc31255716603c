//! User repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::LifelinkError;

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone, address, role, is_active, blood_type, last_donation_date, organization_name, license_number, emergency_contact, created_at";

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, LifelinkError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, phone, address, role, blood_type, organization_name, license_number, emergency_contact, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(request.email)
        .bind(request.password_hash)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.phone)
        .bind(request.address)
        .bind(request.role.as_str())
        .bind(request.blood_type)
        .bind(request.organization_name)
        .bind(request.license_number)
        .bind(request.emergency_contact)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, LifelinkError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, LifelinkError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user profile fields
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User, LifelinkError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                blood_type = COALESCE($6, blood_type),
                organization_name = COALESCE($7, organization_name),
                license_number = COALESCE($8, license_number),
                emergency_contact = COALESCE($9, emergency_contact),
                is_active = COALESCE($10, is_active)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.phone)
        .bind(request.address)
        .bind(request.blood_type)
        .bind(request.organization_name)
        .bind(request.license_number)
        .bind(request.emergency_contact)
        .bind(request.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Activate or deactivate an account
    pub async fn set_active_status(&self, id: i64, is_active: bool) -> Result<User, LifelinkError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_active = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Stamp a donor's last completed donation date
    pub async fn set_last_donation_date(
        &self,
        id: i64,
        date: DateTime<Utc>,
    ) -> Result<User, LifelinkError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET last_donation_date = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// List users with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, LifelinkError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count users with a given role
    pub async fn count_by_role(&self, role: &str) -> Result<i64, LifelinkError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, LifelinkError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Check whether any admin account exists
    pub async fn admin_exists(&self) -> Result<bool, LifelinkError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'admin' AND is_active = true")
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0 > 0)
    }

    /// First active blood bank by id. Used as the fallback owner for
    /// inventory rows created by donation acceptance.
    pub async fn find_first_blood_bank(&self) -> Result<Option<User>, LifelinkError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = 'blood_bank' AND is_active = true ORDER BY id ASC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_repository_creation() {
        // Repository construction requires only a pool handle
        let pool = PgPool::connect("postgresql://test").await;
        if let Ok(pool) = pool {
            let repo = UserRepository::new(pool);
            assert!(!repo.pool.is_closed());
        }
    }
}
