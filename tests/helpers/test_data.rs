//! Test data builders

use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

use lifelink::models::user::User;

/// A user with the given id and role and generated profile fields
pub fn test_user(id: i64, role: &str) -> User {
    User {
        id,
        email: SafeEmail().fake(),
        password_hash: String::new(),
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        phone: None,
        address: None,
        role: role.to_string(),
        is_active: true,
        blood_type: if role == "donor" {
            Some("O+".to_string())
        } else {
            None
        },
        last_donation_date: None,
        organization_name: match role {
            "hospital" => Some("St. Mary's Hospital".to_string()),
            "blood_bank" => Some("Central Blood Bank".to_string()),
            _ => None,
        },
        license_number: None,
        emergency_contact: None,
        created_at: Utc::now(),
    }
}

pub fn test_donor(id: i64) -> User {
    test_user(id, "donor")
}

pub fn test_admin(id: i64) -> User {
    test_user(id, "admin")
}
