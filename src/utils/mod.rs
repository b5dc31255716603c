//! Utility modules
//!
//! This module contains error types, logging setup and shared helpers

pub mod errors;
pub mod helpers;
pub mod logging;

pub use errors::{ErrorSeverity, LifelinkError, Result};
