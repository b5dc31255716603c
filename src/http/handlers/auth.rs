//! Authentication handlers: registration, login, current user

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::state::AppState;
use crate::middleware::auth::AuthUser;
use crate::models::user::{Role, User};
use crate::services::auth::RegisterDetails;
use crate::utils::errors::LifelinkError;
use crate::utils::helpers::normalize_email;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /v1/auth/register/{role}
pub async fn register(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(details): Json<RegisterDetails>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let role: Role = role
        .parse()
        .map_err(|_| LifelinkError::InvalidInput(format!("Unknown registration role: {}", role)))?;

    let user = state.services.auth_service.register(role, details).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    state
        .login_limiter
        .check(&normalize_email(&request.email))?;

    let (user, token) = state
        .services
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse { token, user }))
}

/// GET /v1/auth/me
pub async fn me(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

/// PUT /v1/auth/me
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(update): Json<crate::models::user::UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    let user = state
        .services
        .user_service
        .update_profile(user.id, update)
        .await?;

    Ok(Json(user))
}
