//! Notification handlers, available to every authenticated user

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::http::error::AppError;
use crate::http::handlers::Pagination;
use crate::http::state::AppState;
use crate::middleware::auth::AuthUser;
use crate::models::notification::Notification;

#[derive(Debug, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub unread: i64,
}

/// GET /v1/notifications
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<NotificationList>, AppError> {
    let (limit, offset) = pagination.limits();
    let notifications = state
        .services
        .notification_service
        .list_for_user(user.id, limit, offset)
        .await?;
    let unread = state
        .services
        .notification_service
        .unread_count(user.id)
        .await?;

    Ok(Json(NotificationList {
        notifications,
        unread,
    }))
}

/// POST /v1/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(notification_id): Path<i64>,
) -> Result<Json<Notification>, AppError> {
    let notification = state
        .services
        .notification_service
        .mark_read(user.id, notification_id)
        .await?;

    Ok(Json(notification))
}
