use super::models::{NewNotification, Notification};
use crate::common::{generate_notification_id, safe_email_log, ApiError};
use sqlx::SqlitePool;
use tracing::{error, info};

#[derive(Clone)]
pub struct NotificationsService {
    db: SqlitePool,
}

impl NotificationsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Persist a notification as a new document
    pub async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, ApiError> {
        let stored = Notification {
            id: generate_notification_id(),
            title: notification.title.clone(),
            category: notification.category.clone(),
            time_stamp: notification.time_stamp.clone(),
            status: notification.status.clone(),
            email: notification.email.clone(),
        };

        sqlx::query(
            r#"
            INSERT INTO notifications (id, title, category, time_stamp, status, email)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&stored.id)
        .bind(&stored.title)
        .bind(&stored.category)
        .bind(&stored.time_stamp)
        .bind(&stored.status)
        .bind(&stored.email)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, notification_id = %stored.id, "Database error creating notification");
            ApiError::DatabaseError(e)
        })?;

        info!(
            notification_id = %stored.id,
            category = %stored.category,
            email = %safe_email_log(&stored.email),
            "Notification stored"
        );

        Ok(stored)
    }

    /// Notifications for an owner email, newest first
    pub async fn list_for_email(&self, email: &str) -> Result<Vec<Notification>, ApiError> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, title, category, time_stamp, status, email
            FROM notifications
            WHERE email = ?
            ORDER BY time_stamp DESC, rowid DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }
}
