use crate::notifications::models::NewNotification;
use serde::{Deserialize, Serialize};

// ============================================================================
// Board Snapshot
// ============================================================================

/// Kanban column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    ToDo,
    InProgress,
    Done,
}

impl Bucket {
    /// Processing order of the buckets
    pub const ORDER: [Bucket; 3] = [Bucket::ToDo, Bucket::InProgress, Bucket::Done];

    /// Category label stored on tasks in this bucket
    pub fn category(self) -> &'static str {
        match self {
            Bucket::ToDo => "to-do",
            Bucket::InProgress => "in-progress",
            Bucket::Done => "done",
        }
    }
}

/// Task record as sent by the board. Any `category` the client includes is
/// ignored; the bucket decides it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardTask {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(rename = "toDo", default)]
    pub to_do: Vec<BoardTask>,
    #[serde(rename = "InProgress", default)]
    pub in_progress: Vec<BoardTask>,
    #[serde(default)]
    pub done: Vec<BoardTask>,
}

/// A board task stamped with the category of its bucket
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTask {
    pub task: BoardTask,
    pub category: &'static str,
}

impl BoardSnapshot {
    pub fn is_empty(&self) -> bool {
        self.to_do.is_empty() && self.in_progress.is_empty() && self.done.is_empty()
    }

    fn bucket(&self, bucket: Bucket) -> &[BoardTask] {
        match bucket {
            Bucket::ToDo => &self.to_do,
            Bucket::InProgress => &self.in_progress,
            Bucket::Done => &self.done,
        }
    }

    /// Label every task with its bucket's category and flatten the buckets:
    /// to-do first, then in-progress, then done, input order kept within each
    pub fn labeled(&self) -> Vec<LabeledTask> {
        Bucket::ORDER
            .iter()
            .flat_map(|&bucket| {
                self.bucket(bucket).iter().map(move |task| LabeledTask {
                    task: task.clone(),
                    category: bucket.category(),
                })
            })
            .collect()
    }
}

// ============================================================================
// WebSocket Event Envelope
// ============================================================================

/// Client → Server: `{"event": "tasks", "data": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    Tasks(BoardSnapshot),
}

/// Server → Client: `{"event": "notification", "data": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    Notification(NewNotification),
}
