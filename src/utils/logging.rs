//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Lifelink application.

use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "lifelink.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log admin approval decisions
pub fn log_admin_decision(admin_id: i64, subject: &str, subject_id: i64, decision: &str) {
    warn!(
        admin_id = admin_id,
        subject = subject,
        subject_id = subject_id,
        decision = decision,
        "Admin decision recorded"
    );
}

/// Log inventory changes
pub fn log_inventory_change(blood_bank_id: i64, blood_type: &str, delta: i32, units_after: i32) {
    info!(
        blood_bank_id = blood_bank_id,
        blood_type = blood_type,
        delta = delta,
        units_after = units_after,
        "Inventory changed"
    );
}

/// Log authentication events
pub fn log_auth_event(email: &str, action: &str, success: bool) {
    if success {
        info!(email = email, action = action, "Authentication event: success");
    } else {
        warn!(email = email, action = action, "Authentication event: failure");
    }
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        tracing::error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
