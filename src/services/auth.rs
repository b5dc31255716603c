//! Authentication service implementation
//!
//! This service handles account registration, password verification and
//! bearer-token issuance, plus the role checks used by the HTTP layer.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::config::validation::is_valid_email;
use crate::database::repositories::UserRepository;
use crate::models::user::{CreateUserRequest, Role, User};
use crate::models::BloodType;
use crate::utils::errors::{LifelinkError, Result};
use crate::utils::helpers::normalize_email;

/// JWT claims carried by a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    /// Account role at issuance time
    pub role: String,
    /// Expiry, seconds since epoch
    pub exp: usize,
    /// Issued at, seconds since epoch
    pub iat: usize,
}

/// Profile details accepted at registration time
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDetails {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Donors only
    pub blood_type: Option<String>,
    /// Hospitals and blood banks only
    pub organization_name: Option<String>,
    pub license_number: Option<String>,
    pub emergency_contact: Option<String>,
}

/// Authentication service for account and token management
#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    settings: Settings,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(user_repository: UserRepository, settings: Settings) -> Self {
        Self {
            user_repository,
            settings,
        }
    }

    /// Hash a plain password with argon2id
    pub fn hash_password(password: &str) -> Result<String> {
        use argon2::Argon2;
        use password_hash::rand_core::OsRng;
        use password_hash::{PasswordHasher, SaltString};

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify a password against an argon2id hash
    pub fn verify_password(password: &str, hash: &str) -> bool {
        use argon2::Argon2;
        use password_hash::{PasswordHash, PasswordVerifier};

        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Register a new account with the given role
    pub async fn register(&self, role: Role, details: RegisterDetails) -> Result<User> {
        if !role.is_self_registrable() {
            return Err(LifelinkError::PermissionDenied(
                "Admin accounts cannot be self-registered".to_string(),
            ));
        }

        let email = normalize_email(&details.email);
        if !is_valid_email(&email) {
            return Err(LifelinkError::InvalidInput(format!(
                "Invalid email address: {}",
                email
            )));
        }

        if details.password.len() < self.settings.auth.min_password_length {
            return Err(LifelinkError::InvalidInput(format!(
                "Password must be at least {} characters",
                self.settings.auth.min_password_length
            )));
        }

        if self.user_repository.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "Registration attempted with existing email");
            return Err(LifelinkError::EmailAlreadyRegistered(email));
        }

        let blood_type = match (role, &details.blood_type) {
            (Role::Donor, Some(raw)) => Some(raw.parse::<BloodType>()?.as_str().to_string()),
            (Role::Donor, None) => None,
            // Institutional accounts carry no personal blood type
            _ => None,
        };

        let organization_name = match role {
            Role::Hospital | Role::BloodBank => {
                let name = details.organization_name.clone().unwrap_or_default();
                if name.trim().is_empty() {
                    return Err(LifelinkError::InvalidInput(
                        "Organization name is required".to_string(),
                    ));
                }
                Some(name)
            }
            _ => None,
        };

        let password_hash = Self::hash_password(&details.password)?;

        let user = self
            .user_repository
            .create(CreateUserRequest {
                email: email.clone(),
                password_hash,
                first_name: details.first_name,
                last_name: details.last_name,
                phone: details.phone,
                address: details.address,
                role,
                blood_type,
                organization_name,
                license_number: details.license_number,
                emergency_contact: details.emergency_contact,
            })
            .await?;

        info!(user_id = user.id, role = %role, "New account registered");
        crate::utils::logging::log_auth_event(&email, "register", true);

        Ok(user)
    }

    /// Verify credentials and issue a bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let email = normalize_email(email);

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                crate::utils::logging::log_auth_event(&email, "login", false);
                return Err(LifelinkError::Authentication(
                    "Invalid email or password".to_string(),
                ));
            }
        };

        if !Self::verify_password(password, &user.password_hash) {
            crate::utils::logging::log_auth_event(&email, "login", false);
            return Err(LifelinkError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        if !user.is_active {
            crate::utils::logging::log_auth_event(&email, "login", false);
            return Err(LifelinkError::Authentication(
                "Account is deactivated".to_string(),
            ));
        }

        let token = self.issue_token(&user)?;
        crate::utils::logging::log_auth_event(&email, "login", true);

        Ok((user, token))
    }

    /// Issue a signed token for a user
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now().timestamp() as usize;
        let ttl = self.settings.auth.token_ttl_hours as usize * 3600;
        let claims = Claims {
            sub: user.id,
            role: user.role.clone(),
            exp: now + ttl,
            iat: now,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Decode and validate a token's claims
    pub fn decode_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(data.claims)
    }

    /// Resolve a bearer token into an active user
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let claims = self.decode_token(token).map_err(|e| {
            debug!(error = %e, "Token validation failed");
            LifelinkError::Authentication("Invalid or expired token".to_string())
        })?;

        let user = self
            .user_repository
            .find_by_id(claims.sub)
            .await?
            .ok_or(LifelinkError::UserNotFound {
                user_id: claims.sub,
            })?;

        if !user.is_active {
            return Err(LifelinkError::Authentication(
                "Account is deactivated".to_string(),
            ));
        }

        Ok(user)
    }

    /// Require a specific role or return a permission error
    pub fn require_role(user: &User, required: Role) -> Result<()> {
        let role = user.role()?;
        if role == required {
            Ok(())
        } else {
            Err(LifelinkError::PermissionDenied(format!(
                "This action requires the {} role",
                required
            )))
        }
    }

    /// Drives are managed by their blood-bank organizer or any admin
    pub fn can_manage_drives(user: &User) -> Result<bool> {
        Ok(matches!(user.role()?, Role::Admin | Role::BloodBank))
    }

    /// Seed the configured admin account when no admin exists yet
    pub async fn bootstrap_admin(&self) -> Result<Option<User>> {
        let (email, password) = match (
            &self.settings.auth.admin_email,
            &self.settings.auth.admin_password,
        ) {
            (Some(email), Some(password)) => (normalize_email(email), password.clone()),
            _ => return Ok(None),
        };

        if self.user_repository.admin_exists().await? {
            return Ok(None);
        }

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(LifelinkError::Config(format!(
                "Configured admin email {} belongs to a non-admin account",
                email
            )));
        }

        let password_hash = Self::hash_password(&password)?;
        let user = self
            .user_repository
            .create(CreateUserRequest {
                email: email.clone(),
                password_hash,
                first_name: "System".to_string(),
                last_name: "Administrator".to_string(),
                phone: None,
                address: None,
                role: Role::Admin,
                blood_type: None,
                organization_name: None,
                license_number: None,
                emergency_contact: None,
            })
            .await?;

        info!(user_id = user.id, email = %email, "Seed admin account created");
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "unit-test-secret-key-0123456789abcdef".to_string();
        settings
    }

    fn test_user(role: &str) -> User {
        User {
            id: 42,
            email: "user@example.com".to_string(),
            password_hash: String::new(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: None,
            address: None,
            role: role.to_string(),
            is_active: true,
            blood_type: None,
            last_donation_date: None,
            organization_name: None,
            license_number: None,
            emergency_contact: None,
            created_at: Utc::now(),
        }
    }

    async fn service() -> Option<AuthService> {
        let pool = sqlx::PgPool::connect_lazy("postgresql://localhost/test").ok()?;
        Some(AuthService::new(UserRepository::new(pool), test_settings()))
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = AuthService::hash_password("correct horse battery staple").unwrap();
        assert!(AuthService::verify_password(
            "correct horse battery staple",
            &hash
        ));
        assert!(!AuthService::verify_password("wrong password", &hash));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!AuthService::verify_password("anything", "not-a-hash"));
    }

    #[tokio::test]
    async fn test_token_round_trip() {
        let Some(service) = service().await else {
            return;
        };
        let user = test_user("donor");

        let token = service.issue_token(&user).unwrap();
        let claims = service.decode_token(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "donor");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn test_tampered_token_rejected() {
        let Some(service) = service().await else {
            return;
        };
        let user = test_user("donor");

        let mut token = service.issue_token(&user).unwrap();
        token.push('x');
        assert!(service.decode_token(&token).is_err());
    }

    #[test]
    fn test_require_role() {
        let donor = test_user("donor");
        assert!(AuthService::require_role(&donor, Role::Donor).is_ok());
        assert!(AuthService::require_role(&donor, Role::Admin).is_err());
    }

    #[test]
    fn test_drive_management_roles() {
        assert!(AuthService::can_manage_drives(&test_user("admin")).unwrap());
        assert!(AuthService::can_manage_drives(&test_user("blood_bank")).unwrap());
        assert!(!AuthService::can_manage_drives(&test_user("donor")).unwrap());
        assert!(!AuthService::can_manage_drives(&test_user("hospital")).unwrap());
    }
}
