//! HTTP module
//!
//! The axum REST surface: router, shared state, error mapping and handlers

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
