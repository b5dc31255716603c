//! Authentication extractors
//!
//! Bearer-token authentication for protected endpoints, plus role-scoped
//! extractors mirroring the role gates on each dashboard.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::debug;

use crate::http::error::AppError;
use crate::http::state::AppState;
use crate::models::user::{Role, User};
use crate::utils::errors::LifelinkError;

/// Any authenticated, active user
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

fn bearer_token(parts: &Parts) -> Result<&str, LifelinkError> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            LifelinkError::Authentication("Missing Authorization header".to_string())
        })?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        LifelinkError::Authentication("Authorization header must use the Bearer scheme".to_string())
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = state.services.auth_service.authenticate(token).await?;

        debug!(user_id = user.id, role = %user.role, "Request authenticated");
        Ok(AuthUser(user))
    }
}

macro_rules! role_extractor {
    ($name:ident, $role:expr, $label:literal) => {
        #[doc = concat!("An authenticated user holding the ", $label, " role")]
        #[derive(Debug, Clone)]
        pub struct $name(pub User);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
                if user.role()? != $role {
                    return Err(AppError::from(LifelinkError::PermissionDenied(
                        concat!("This endpoint requires the ", $label, " role").to_string(),
                    )));
                }
                Ok($name(user))
            }
        }
    };
}

role_extractor!(AdminUser, Role::Admin, "admin");
role_extractor!(DonorUser, Role::Donor, "donor");
role_extractor!(HospitalUser, Role::Hospital, "hospital");
role_extractor!(BankUser, Role::BloodBank, "blood bank");
