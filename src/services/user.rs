//! User service implementation
//!
//! Profile management and account administration.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::database::repositories::UserRepository;
use crate::models::user::{Role, UpdateUserRequest, User};
use crate::models::BloodType;
use crate::utils::errors::{LifelinkError, Result};

/// User service for managing user operations
#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(LifelinkError::UserNotFound { user_id })
    }

    /// Update a user's own profile
    pub async fn update_profile(
        &self,
        user_id: i64,
        mut update: UpdateUserRequest,
    ) -> Result<User> {
        debug!(user_id = user_id, "Updating user profile");

        // Account status is an admin-only concern
        update.is_active = None;

        if let Some(ref raw) = update.blood_type {
            update.blood_type = Some(raw.parse::<BloodType>()?.as_str().to_string());
        }

        let user = self.user_repository.update(user_id, update).await?;
        info!(user_id = user_id, "User profile updated");

        Ok(user)
    }

    /// Activate or deactivate an account
    pub async fn set_active_status(
        &self,
        admin_id: i64,
        user_id: i64,
        is_active: bool,
    ) -> Result<User> {
        if admin_id == user_id {
            return Err(LifelinkError::PermissionDenied(
                "Admins cannot deactivate their own account".to_string(),
            ));
        }

        let existing = self.get_user(user_id).await?;
        let user = self
            .user_repository
            .set_active_status(existing.id, is_active)
            .await?;

        if is_active {
            info!(user_id = user_id, admin_id = admin_id, "Account activated");
        } else {
            warn!(user_id = user_id, admin_id = admin_id, "Account deactivated");
        }

        Ok(user)
    }

    /// List users with pagination
    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        if limit > crate::utils::helpers::MAX_PAGE_SIZE {
            return Err(LifelinkError::InvalidInput(format!(
                "Limit cannot exceed {}",
                crate::utils::helpers::MAX_PAGE_SIZE
            )));
        }

        self.user_repository.list(limit, offset).await
    }

    /// Account counts by role
    pub async fn user_statistics(&self) -> Result<HashMap<String, i64>> {
        let mut stats = HashMap::new();
        stats.insert(
            "total_users".to_string(),
            self.user_repository.count().await?,
        );
        for role in [Role::Admin, Role::Donor, Role::Hospital, Role::BloodBank] {
            stats.insert(
                format!("{}_users", role.as_str()),
                self.user_repository.count_by_role(role.as_str()).await?,
            );
        }

        Ok(stats)
    }
}
