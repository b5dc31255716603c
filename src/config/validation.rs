//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use regex::Regex;

use super::Settings;
use crate::utils::errors::{LifelinkError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_auth_config(&settings.auth)?;
    validate_database_config(&settings.database)?;
    validate_donation_config(&settings.donation)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate authentication configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(LifelinkError::Config(
            "JWT secret is required".to_string(),
        ));
    }

    if config.jwt_secret.len() < 32 {
        return Err(LifelinkError::Config(
            "JWT secret must be at least 32 bytes".to_string(),
        ));
    }

    if config.token_ttl_hours == 0 {
        return Err(LifelinkError::Config(
            "Token TTL must be greater than 0".to_string(),
        ));
    }

    if config.min_password_length < 8 {
        return Err(LifelinkError::Config(
            "Minimum password length cannot be below 8".to_string(),
        ));
    }

    match (&config.admin_email, &config.admin_password) {
        (Some(email), Some(_)) => {
            if !is_valid_email(email) {
                return Err(LifelinkError::Config(format!(
                    "Invalid admin email: {}",
                    email
                )));
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(LifelinkError::Config(
                "Admin email and password must be configured together".to_string(),
            ));
        }
        (None, None) => {}
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(LifelinkError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(LifelinkError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(LifelinkError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate donation workflow configuration
fn validate_donation_config(config: &super::DonationConfig) -> Result<()> {
    if config.min_interval_days <= 0 {
        return Err(LifelinkError::Config(
            "Donation interval must be greater than 0 days".to_string(),
        ));
    }

    if config.low_stock_threshold < 0 {
        return Err(LifelinkError::Config(
            "Low stock threshold cannot be negative".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(LifelinkError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(LifelinkError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

/// Basic shape check for email addresses
pub fn is_valid_email(email: &str) -> bool {
    // Deliberately loose: one @, non-empty local part, dotted domain
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email regex");
    re.is_match(email)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn settings_with_secret() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "0123456789abcdef0123456789abcdef".to_string();
        settings
    }

    #[test]
    fn test_default_settings_missing_secret() {
        let settings = Settings::default();
        assert_matches!(
            validate_settings(&settings),
            Err(LifelinkError::Config(_))
        );
    }

    #[test]
    fn test_valid_settings() {
        let settings = settings_with_secret();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut settings = settings_with_secret();
        settings.auth.jwt_secret = "short".to_string();
        assert_matches!(
            validate_settings(&settings),
            Err(LifelinkError::Config(_))
        );
    }

    #[test]
    fn test_admin_seed_requires_both_fields() {
        let mut settings = settings_with_secret();
        settings.auth.admin_email = Some("admin@lifelink.org".to_string());
        assert!(validate_settings(&settings).is_err());

        settings.auth.admin_password = Some("changeme123".to_string());
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_donation_interval_must_be_positive() {
        let mut settings = settings_with_secret();
        settings.donation.min_interval_days = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = settings_with_secret();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("donor@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
    }
}
