use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const STATUS_UNSEEN: &str = "unseen";

/// Notification as emitted to the client, before it has a stored id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub category: String,
    pub time_stamp: String,
    pub status: String,
    pub email: String,
}

impl NewNotification {
    /// An unseen notification announcing that a task moved to `category`
    pub fn category_changed(title: &str, category: &str, email: &str, time_stamp: &str) -> Self {
        Self {
            title: title.to_string(),
            category: category.to_string(),
            time_stamp: time_stamp.to_string(),
            status: STATUS_UNSEEN.to_string(),
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub category: String,
    pub time_stamp: String,
    pub status: String,
    pub email: String,
}
