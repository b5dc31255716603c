//! User model
//!
//! A single `users` table holds every account; the `role` column is the
//! discriminator between admins, donors, hospitals and blood banks.
//! Role-specific columns are nullable and only populated for that role.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::LifelinkError;

/// Account role discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Donor,
    Hospital,
    BloodBank,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Donor => "donor",
            Role::Hospital => "hospital",
            Role::BloodBank => "blood_bank",
        }
    }

    /// Roles that may self-register through the public API
    pub fn is_self_registrable(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LifelinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "donor" => Ok(Role::Donor),
            "hospital" => Ok(Role::Hospital),
            "blood_bank" => Ok(Role::BloodBank),
            other => Err(LifelinkError::InvalidInput(format!(
                "Unknown role: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub is_active: bool,
    // Donor fields
    pub blood_type: Option<String>,
    pub last_donation_date: Option<DateTime<Utc>>,
    // Hospital / blood bank fields
    pub organization_name: Option<String>,
    pub license_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Result<Role, LifelinkError> {
        self.role.parse()
    }

    /// Display name: organization name for institutional accounts,
    /// "First Last" otherwise
    pub fn display_name(&self) -> String {
        match self.organization_name {
            Some(ref name) if !name.is_empty() => name.clone(),
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub blood_type: Option<String>,
    pub organization_name: Option<String>,
    pub license_number: Option<String>,
    pub emergency_contact: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub organization_name: Option<String>,
    pub license_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Donor, Role::Hospital, Role::BloodBank] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_admin_cannot_self_register() {
        assert!(!Role::Admin.is_self_registrable());
        assert!(Role::Donor.is_self_registrable());
        assert!(Role::Hospital.is_self_registrable());
        assert!(Role::BloodBank.is_self_registrable());
    }

    #[test]
    fn test_display_name_prefers_organization() {
        let mut user = test_user();
        assert_eq!(user.display_name(), "Jane Doe");

        user.organization_name = Some("City General".to_string());
        assert_eq!(user.display_name(), "City General");
    }

    fn test_user() -> User {
        User {
            id: 1,
            email: "jane@example.com".to_string(),
            password_hash: "x".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone: None,
            address: None,
            role: "donor".to_string(),
            is_active: true,
            blood_type: Some("A+".to_string()),
            last_donation_date: None,
            organization_name: None,
            license_number: None,
            emergency_contact: None,
            created_at: Utc::now(),
        }
    }
}
