//! Middleware module
//!
//! Authentication extractors and rate limiting for the HTTP layer

pub mod auth;
pub mod rate_limit;

pub use auth::{AdminUser, AuthUser, BankUser, DonorUser, HospitalUser};
pub use rate_limit::LoginRateLimiter;
