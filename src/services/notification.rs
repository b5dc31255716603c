//! Notification service implementation
//!
//! This service formats templated messages for the approval workflow and
//! records them against the affected user. Dashboards read them back through
//! the notifications endpoints.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::database::repositories::NotificationRepository;
use crate::models::notification::{CreateNotificationRequest, Notification};
use crate::utils::errors::{LifelinkError, Result};

/// Delivery counters
#[derive(Debug, Default)]
struct Counters {
    delivered: AtomicU64,
    failed: AtomicU64,
}

/// Snapshot of delivery counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationStats {
    pub delivered: u64,
    pub failed: u64,
}

/// Notification service for recording user-facing messages
#[derive(Clone)]
pub struct NotificationService {
    repository: NotificationRepository,
    templates: HashMap<&'static str, &'static str>,
    enabled: bool,
    counters: Arc<Counters>,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(repository: NotificationRepository, enabled: bool) -> Self {
        Self {
            repository,
            templates: Self::default_templates(),
            enabled,
            counters: Arc::new(Counters::default()),
        }
    }

    fn default_templates() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (
                "request.accepted",
                "Your blood request for {units} units of {blood_type} was accepted.",
            ),
            (
                "request.rejected",
                "Your blood request for {units} units of {blood_type} was rejected.",
            ),
            (
                "request.fulfilled",
                "Your blood request for {units} units of {blood_type} was fulfilled.",
            ),
            (
                "donation.accepted",
                "Your donation of {units} units of {blood_type} was accepted.",
            ),
            (
                "donation.rejected",
                "Your donation of {units} units of {blood_type} was rejected.",
            ),
            (
                "donation.completed",
                "Your donation of {units} units of {blood_type} is complete. Thank you!",
            ),
            (
                "registration.confirmed",
                "Your registration for the blood drive \"{title}\" was confirmed.",
            ),
        ])
    }

    /// Format a template with the given parameters
    pub fn format_message(&self, kind: &str, params: &HashMap<String, String>) -> Result<String> {
        let template = self
            .templates
            .get(kind)
            .ok_or_else(|| LifelinkError::InvalidInput(format!("Unknown template: {}", kind)))?;

        let mut message = (*template).to_string();
        for (key, value) in params {
            message = message.replace(&format!("{{{}}}", key), value);
        }

        Ok(message)
    }

    /// Format and record a notification for a user
    pub async fn notify(
        &self,
        user_id: i64,
        kind: &str,
        params: &HashMap<String, String>,
    ) -> Result<Option<Notification>> {
        if !self.enabled {
            debug!(user_id = user_id, kind = kind, "Notifications disabled, skipping");
            return Ok(None);
        }

        let body = self.format_message(kind, params)?;

        match self
            .repository
            .create(CreateNotificationRequest {
                user_id,
                kind: kind.to_string(),
                body,
            })
            .await
        {
            Ok(notification) => {
                self.counters.delivered.fetch_add(1, Ordering::Relaxed);
                info!(user_id = user_id, kind = kind, "Notification recorded");
                Ok(Some(notification))
            }
            Err(e) => {
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                error!(user_id = user_id, kind = kind, error = %e, "Failed to record notification");
                Err(e)
            }
        }
    }

    /// List a user's notifications, newest first
    pub async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>> {
        self.repository.list_by_user(user_id, limit, offset).await
    }

    /// Mark one of the user's notifications read
    pub async fn mark_read(&self, user_id: i64, notification_id: i64) -> Result<Notification> {
        self.repository
            .mark_read(notification_id, user_id)
            .await?
            .ok_or(LifelinkError::InvalidInput(format!(
                "Notification {} not found",
                notification_id
            )))
    }

    /// Count a user's unread notifications
    pub async fn unread_count(&self, user_id: i64) -> Result<i64> {
        self.repository.unread_count(user_id).await
    }

    /// Snapshot of delivery counters
    pub fn stats(&self) -> NotificationStats {
        NotificationStats {
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> Option<NotificationService> {
        let pool = sqlx::PgPool::connect_lazy("postgresql://localhost/test").ok()?;
        Some(NotificationService::new(
            NotificationRepository::new(pool),
            true,
        ))
    }

    #[tokio::test]
    async fn test_format_message() {
        let Some(service) = service() else { return };

        let params = HashMap::from([
            ("units".to_string(), "3".to_string()),
            ("blood_type".to_string(), "O-".to_string()),
        ]);
        let message = service.format_message("request.accepted", &params).unwrap();
        assert_eq!(message, "Your blood request for 3 units of O- was accepted.");
    }

    #[tokio::test]
    async fn test_format_message_unknown_template() {
        let Some(service) = service() else { return };
        assert!(service
            .format_message("request.unknown", &HashMap::new())
            .is_err());
    }

    #[tokio::test]
    async fn test_unreplaced_placeholders_survive() {
        let Some(service) = service() else { return };
        let message = service
            .format_message("registration.confirmed", &HashMap::new())
            .unwrap();
        assert!(message.contains("{title}"));
    }
}
