use super::models::{
    CreateTaskRequest, DeleteOutcome, Task, TaskRow, UpdateOutcome, UpdateTaskRequest,
};
use crate::common::{generate_task_id, now_iso8601, safe_email_log, ApiError, Validator};
use sqlx::SqlitePool;
use tracing::{debug, error, info};

const TASK_COLUMNS: &str = "id, title, description, time_stamp, category, email";

#[derive(Clone)]
pub struct TasksService {
    db: SqlitePool,
}

impl TasksService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// List tasks, optionally only those owned by `email`
    pub async fn list_tasks(&self, email: Option<&str>) -> Result<Vec<Task>, ApiError> {
        let rows = match email {
            Some(email) => {
                sqlx::query_as::<_, TaskRow>(&format!(
                    "SELECT {} FROM tasks WHERE email = ? ORDER BY time_stamp ASC, rowid ASC",
                    TASK_COLUMNS
                ))
                .bind(email)
                .fetch_all(&self.db)
                .await
            }
            None => {
                sqlx::query_as::<_, TaskRow>(&format!(
                    "SELECT {} FROM tasks ORDER BY time_stamp ASC, rowid ASC",
                    TASK_COLUMNS
                ))
                .fetch_all(&self.db)
                .await
            }
        }
        .map_err(ApiError::DatabaseError)?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    pub async fn find_task(&self, task_id: &str) -> Result<Option<Task>, ApiError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE id = ?",
            TASK_COLUMNS
        ))
        .bind(task_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(row.map(Task::from))
    }

    /// Insert a new task; `timeStamp` defaults to the insertion time
    pub async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, ApiError> {
        request.validate(&request).into_result()?;

        let task = Task {
            id: generate_task_id(),
            title: request.title.unwrap_or_default(),
            description: request.description,
            time_stamp: request.time_stamp.unwrap_or_else(now_iso8601),
            category: request.category.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
        };

        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, description, time_stamp, category, email)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(task.description.as_ref().map(|d| d.to_json()))
        .bind(&task.time_stamp)
        .bind(&task.category)
        .bind(&task.email)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, task_id = %task.id, "Database error creating task");
            ApiError::DatabaseError(e)
        })?;

        info!(
            task_id = %task.id,
            category = %task.category,
            email = %safe_email_log(&task.email),
            "Task created"
        );

        Ok(task)
    }

    /// Merge the given fields into the task matched by id.
    /// An unknown id matches nothing and is not an error.
    pub async fn update_task(
        &self,
        task_id: &str,
        request: UpdateTaskRequest,
    ) -> Result<UpdateOutcome, ApiError> {
        request.validate(&request).into_result()?;

        let Some(existing) = self.find_task(task_id).await? else {
            debug!(task_id = %task_id, "Update matched no task");
            return Ok(UpdateOutcome {
                matched_count: 0,
                modified_count: 0,
            });
        };

        let merged = existing.merged_with(&request);
        if merged == existing {
            return Ok(UpdateOutcome {
                matched_count: 1,
                modified_count: 0,
            });
        }

        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, time_stamp = ?, category = ?, email = ?
            WHERE id = ?
            "#,
        )
        .bind(&merged.title)
        .bind(merged.description.as_ref().map(|d| d.to_json()))
        .bind(&merged.time_stamp)
        .bind(&merged.category)
        .bind(&merged.email)
        .bind(task_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(task_id = %task_id, "Task updated");

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: result.rows_affected(),
        })
    }

    /// Set only the category of a task. Returns the number of documents whose
    /// category actually changed: 0 for an unknown id or an unchanged value.
    pub async fn set_category(&self, task_id: &str, category: &str) -> Result<u64, ApiError> {
        let result = sqlx::query("UPDATE tasks SET category = ? WHERE id = ? AND category IS NOT ?")
            .bind(category)
            .bind(task_id)
            .bind(category)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        Ok(result.rows_affected())
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<DeleteOutcome, ApiError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(task_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        let deleted_count = result.rows_affected();
        info!(task_id = %task_id, deleted_count, "Task delete processed");

        Ok(DeleteOutcome { deleted_count })
    }
}
