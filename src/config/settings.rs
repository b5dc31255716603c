//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub donation: DonationConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: u64,
    pub min_password_length: usize,
    pub login_attempts_per_minute: u32,
    /// Seed admin account, created at startup when missing
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Donation workflow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DonationConfig {
    /// Minimum days a donor must wait between completed donations
    pub min_interval_days: i64,
    /// Units below which an inventory entry counts as low stock
    pub low_stock_threshold: i32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_files: u32,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    /// Public board of urgent pending requests
    pub emergency_board: bool,
    /// Per-user notifications emitted by the approval workflow
    pub notifications: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("LIFELINK").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::LifelinkError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                token_ttl_hours: 24,
                min_password_length: 8,
                login_attempts_per_minute: 5,
                admin_email: None,
                admin_password: None,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/lifelink".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            donation: DonationConfig {
                min_interval_days: 56,
                low_stock_threshold: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/lifelink".to_string(),
                max_files: 5,
            },
            features: FeaturesConfig {
                emergency_board: true,
                notifications: true,
            },
        }
    }
}
