//! Notification repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::notification::{CreateNotificationRequest, Notification};
use crate::utils::errors::LifelinkError;

const NOTIFICATION_COLUMNS: &str = "id, user_id, kind, body, created_at, read_at";

#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a notification for a user
    pub async fn create(
        &self,
        request: CreateNotificationRequest,
    ) -> Result<Notification, LifelinkError> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (user_id, kind, body, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(request.user_id)
        .bind(request.kind)
        .bind(request.body)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    /// A user's notifications, newest first
    pub async fn list_by_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, LifelinkError> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Mark a notification read; scoped to the owning user
    pub async fn mark_read(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Notification>, LifelinkError> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            r#"
            UPDATE notifications
            SET read_at = COALESCE(read_at, $3)
            WHERE id = $1 AND user_id = $2
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    /// Count a user's unread notifications
    pub async fn unread_count(&self, user_id: i64) -> Result<i64, LifelinkError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notification_repository_creation() {
        let pool = PgPool::connect("postgresql://test").await;
        if let Ok(pool) = pool {
            let repo = NotificationRepository::new(pool);
            assert!(!repo.pool.is_closed());
        }
    }
}
