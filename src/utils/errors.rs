//! Error handling for Lifelink
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the Lifelink application
#[derive(Error, Debug)]
pub enum LifelinkError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Blood request not found: {request_id}")]
    RequestNotFound { request_id: i64 },

    #[error("Donation not found: {donation_id}")]
    DonationNotFound { donation_id: i64 },

    #[error("Blood drive not found: {drive_id}")]
    DriveNotFound { drive_id: i64 },

    #[error("Drive registration not found: {registration_id}")]
    RegistrationNotFound { registration_id: i64 },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Insufficient inventory for {blood_type}: requested {requested}, available {available}")]
    InsufficientInventory {
        blood_type: String,
        requested: i32,
        available: i32,
    },

    #[error("No blood bank available to hold inventory")]
    NoBloodBank,

    #[error("Donor must wait {days_remaining} more days before donating again")]
    DonorNotEligible { days_remaining: i64 },

    #[error("Already registered for blood drive {drive_id}")]
    AlreadyRegistered { drive_id: i64 },

    #[error("Email already registered: {0}")]
    EmailAlreadyRegistered(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for Lifelink operations
pub type Result<T> = std::result::Result<T, LifelinkError>;

impl LifelinkError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            LifelinkError::Database(_) => false,
            LifelinkError::Migration(_) => false,
            LifelinkError::Config(_) => false,
            LifelinkError::Token(_) => false,
            LifelinkError::PasswordHash(_) => false,
            LifelinkError::PermissionDenied(_) => false,
            LifelinkError::Authentication(_) => false,
            LifelinkError::UserNotFound { .. } => false,
            LifelinkError::RequestNotFound { .. } => false,
            LifelinkError::DonationNotFound { .. } => false,
            LifelinkError::DriveNotFound { .. } => false,
            LifelinkError::RegistrationNotFound { .. } => false,
            LifelinkError::InvalidStateTransition { .. } => false,
            LifelinkError::InsufficientInventory { .. } => true,
            LifelinkError::NoBloodBank => true,
            LifelinkError::DonorNotEligible { .. } => true,
            LifelinkError::AlreadyRegistered { .. } => false,
            LifelinkError::EmailAlreadyRegistered(_) => false,
            LifelinkError::Serialization(_) => false,
            LifelinkError::Io(_) => true,
            LifelinkError::RateLimitExceeded => true,
            LifelinkError::InvalidInput(_) => false,
            LifelinkError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LifelinkError::Database(_) => ErrorSeverity::Critical,
            LifelinkError::Migration(_) => ErrorSeverity::Critical,
            LifelinkError::Config(_) => ErrorSeverity::Critical,
            LifelinkError::NoBloodBank => ErrorSeverity::Error,
            LifelinkError::PermissionDenied(_) => ErrorSeverity::Warning,
            LifelinkError::Authentication(_) => ErrorSeverity::Warning,
            LifelinkError::RateLimitExceeded => ErrorSeverity::Warning,
            LifelinkError::InsufficientInventory { .. } => ErrorSeverity::Warning,
            LifelinkError::InvalidInput(_) => ErrorSeverity::Info,
            LifelinkError::DonorNotEligible { .. } => ErrorSeverity::Info,
            LifelinkError::AlreadyRegistered { .. } => ErrorSeverity::Info,
            LifelinkError::EmailAlreadyRegistered(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

impl From<password_hash::Error> for LifelinkError {
    fn from(err: password_hash::Error) -> Self {
        LifelinkError::PasswordHash(err.to_string())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_classification() {
        assert_eq!(
            LifelinkError::Config("missing".to_string()).severity(),
            ErrorSeverity::Critical
        );
        assert_eq!(
            LifelinkError::PermissionDenied("nope".to_string()).severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            LifelinkError::InvalidInput("bad".to_string()).severity(),
            ErrorSeverity::Info
        );
        assert_eq!(
            LifelinkError::UserNotFound { user_id: 1 }.severity(),
            ErrorSeverity::Error
        );
    }

    #[test]
    fn test_recoverability() {
        assert!(LifelinkError::RateLimitExceeded.is_recoverable());
        assert!(LifelinkError::DonorNotEligible { days_remaining: 3 }.is_recoverable());
        assert!(!LifelinkError::Config("broken".to_string()).is_recoverable());
        assert!(!LifelinkError::InvalidStateTransition {
            from: "PENDING".to_string(),
            to: "FULFILLED".to_string()
        }
        .is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = LifelinkError::InsufficientInventory {
            blood_type: "A+".to_string(),
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient inventory for A+: requested 5, available 2"
        );

        let err = LifelinkError::DonorNotEligible { days_remaining: 12 };
        assert!(err.to_string().contains("12 more days"));
    }
}
