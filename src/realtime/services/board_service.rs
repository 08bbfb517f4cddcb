use crate::common::{now_iso8601, ApiError};
use crate::notifications::models::{NewNotification, Notification};
use crate::notifications::services::NotificationsService;
use crate::realtime::models::{BoardSnapshot, LabeledTask};
use crate::tasks::services::TasksService;
use futures::future::join_all;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// Errors raised while handling a realtime event. They are logged and never
/// sent back to the client.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("malformed event: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(#[from] ApiError),
}

/// Applies board snapshots to the store
pub struct BoardService {
    tasks: TasksService,
    notifications: NotificationsService,
}

impl BoardService {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            tasks: TasksService::new(db.clone()),
            notifications: NotificationsService::new(db),
        }
    }

    /// Move every task of the snapshot to its bucket's category and return
    /// the notification for the first task whose category changed, if any
    pub async fn process_snapshot(&self, snapshot: &BoardSnapshot) -> Option<NewNotification> {
        if snapshot.is_empty() {
            debug!("Empty board snapshot, nothing to update");
            return None;
        }

        let labeled = snapshot.labeled();
        let outcomes = self.update_categories(&labeled).await;
        let notifications = synthesize_notifications(&labeled, &outcomes, &now_iso8601());

        info!(
            tasks = labeled.len(),
            changed = notifications.len(),
            "Board snapshot applied"
        );

        if notifications.len() > 1 {
            debug!(
                dropped = notifications.len() - 1,
                "Only the first category change of a snapshot is announced"
            );
        }

        notifications.into_iter().next()
    }

    /// One concurrent update per task, joined. Each outcome is kept at its
    /// task's position so one failure does not hide the others.
    pub async fn update_categories(&self, labeled: &[LabeledTask]) -> Vec<Result<u64, ApiError>> {
        join_all(
            labeled
                .iter()
                .map(|item| self.tasks.set_category(&item.task.id, item.category)),
        )
        .await
    }

    /// Persist an emitted notification
    pub async fn record_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, ChannelError> {
        Ok(self.notifications.create_notification(notification).await?)
    }
}

/// Notifications for every position whose update modified a document, in
/// sequence order. Failed updates are logged and skipped.
pub fn synthesize_notifications(
    labeled: &[LabeledTask],
    outcomes: &[Result<u64, ApiError>],
    time_stamp: &str,
) -> Vec<NewNotification> {
    labeled
        .iter()
        .zip(outcomes)
        .filter_map(|(item, outcome)| match outcome {
            Ok(modified) if *modified > 0 => Some(NewNotification::category_changed(
                &item.task.title,
                item.category,
                &item.task.email,
                time_stamp,
            )),
            Ok(_) => None,
            Err(e) => {
                warn!(
                    task_id = %item.task.id,
                    category = %item.category,
                    error = %e,
                    "Category update failed"
                );
                None
            }
        })
        .collect()
}
