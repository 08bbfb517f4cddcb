use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

pub const MAX_TITLE_LENGTH: usize = 50;
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Task description: free text or any structured JSON value.
/// Only the text form is length-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskDescription {
    Text(String),
    Structured(serde_json::Value),
}

impl TaskDescription {
    pub fn to_json(&self) -> String {
        // Serializing a String or a serde_json::Value cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Row as stored; `description` is JSON text
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub time_stamp: String,
    pub category: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<TaskDescription>,
    pub time_stamp: String,
    pub category: String,
    pub email: String,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description.as_deref().and_then(TaskDescription::from_json),
            time_stamp: row.time_stamp,
            category: row.category,
            email: row.email,
        }
    }
}

impl Task {
    /// Set-merge: every field present in `update` replaces the stored one
    pub fn merged_with(&self, update: &UpdateTaskRequest) -> Task {
        let mut merged = self.clone();
        if let Some(title) = &update.title {
            merged.title = title.clone();
        }
        if let Some(description) = &update.description {
            merged.description = description.clone();
        }
        if let Some(time_stamp) = &update.time_stamp {
            merged.time_stamp = time_stamp.clone();
        }
        if let Some(category) = &update.category {
            merged.category = category.clone();
        }
        if let Some(email) = &update.email {
            merged.email = email.clone();
        }
        merged
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<TaskDescription>,
    pub time_stamp: Option<String>,
    pub category: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    /// Absent leaves the description alone; `null` clears it
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<TaskDescription>>,
    pub time_stamp: Option<String>,
    pub category: Option<String>,
    pub email: Option<String>,
}

/// Distinguishes a field sent as `null` (`Some(None)`) from one left out
/// (`None`, via `#[serde(default)]`)
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}
