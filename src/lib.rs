//! Lifelink blood donation coordination service
//!
//! This library provides the components of a blood-donation coordination
//! platform: donors schedule donations and register for drives, hospitals
//! raise blood requests, blood banks manage inventory and organize drives,
//! and administrators run the approval workflow connecting requests,
//! donations and inventory.

pub mod config;
pub mod database;
pub mod http;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{LifelinkError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use http::{create_router, AppState};
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
