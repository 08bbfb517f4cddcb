//! Tests for tasks module
//!
//! These tests verify:
//! - Body parsing and field validation
//! - The description union and its length rule
//! - Create / list / merge-update / delete against the store

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::store::test_support::memory_store;
    use crate::common::{ApiError, Validator};
    use crate::tasks::models::{CreateTaskRequest, TaskDescription, UpdateTaskRequest};
    use serde_json::json;

    fn create_request(title: &str, category: &str, email: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: Some(title.to_string()),
            description: None,
            time_stamp: None,
            category: Some(category.to_string()),
            email: Some(email.to_string()),
        }
    }

    #[test]
    fn test_empty_body_is_rejected() {
        for body in [None, Some(json!(null)), Some(json!({}))] {
            match validators::parse_create_body(body) {
                Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "Task are required"),
                other => panic!("unexpected result: {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_create_validation_reports_missing_fields() {
        let request = validators::parse_create_body(Some(json!({ "description": "x" }))).unwrap();
        let result = request.validate(&request);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "category", "email"]);
    }

    #[test]
    fn test_title_length_limit() {
        let ok = create_request(&"a".repeat(50), "to-do", "a@x.com");
        assert!(ok.validate(&ok).is_valid);

        let too_long = create_request(&"a".repeat(51), "to-do", "a@x.com");
        let result = too_long.validate(&too_long);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "title");
    }

    #[test]
    fn test_description_union() {
        let text: TaskDescription = serde_json::from_value(json!("buy milk")).unwrap();
        assert_eq!(text, TaskDescription::Text("buy milk".to_string()));

        let structured: TaskDescription =
            serde_json::from_value(json!({ "steps": ["a", "b"] })).unwrap();
        assert!(matches!(structured, TaskDescription::Structured(_)));

        // Length rule only applies to the text form
        let mut request = create_request("T", "to-do", "a@x.com");
        request.description = Some(TaskDescription::Text("d".repeat(201)));
        assert!(!request.validate(&request).is_valid);

        request.description = Some(TaskDescription::Structured(json!({ "notes": "d".repeat(500) })));
        assert!(request.validate(&request).is_valid);
    }

    #[test]
    fn test_description_json_storage_keeps_variant() {
        let text = TaskDescription::Text("42".to_string());
        assert_eq!(TaskDescription::from_json(&text.to_json()), Some(text));

        let number = TaskDescription::Structured(json!(42));
        assert_eq!(TaskDescription::from_json(&number.to_json()), Some(number));
    }

    #[test]
    fn test_update_validation_only_checks_present_fields() {
        let empty = UpdateTaskRequest::default();
        assert!(empty.validate(&empty).is_valid);

        let blank_category = UpdateTaskRequest {
            category: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(!blank_category.validate(&blank_category).is_valid);
    }

    #[test]
    fn test_task_serializes_with_wire_names() {
        let task = models::Task {
            id: "T_1".to_string(),
            title: "A".to_string(),
            description: None,
            time_stamp: "2024-01-01T00:00:00.000Z".to_string(),
            category: "to-do".to_string(),
            email: "a@x.com".to_string(),
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "T_1",
                "title": "A",
                "timeStamp": "2024-01-01T00:00:00.000Z",
                "category": "to-do",
                "email": "a@x.com"
            })
        );
    }

    #[tokio::test]
    async fn test_create_and_list_tasks() {
        let store = memory_store().await;
        let service = services::TasksService::new(store.pool().unwrap());

        let first = service
            .create_task(create_request("First", "to-do", "a@x.com"))
            .await
            .unwrap();
        assert!(first.id.starts_with("T_"));
        assert!(!first.time_stamp.is_empty());

        service
            .create_task(create_request("Other", "done", "b@x.com"))
            .await
            .unwrap();

        assert_eq!(service.list_tasks(None).await.unwrap().len(), 2);

        let owned = service.list_tasks(Some("a@x.com")).await.unwrap();
        assert_eq!(owned, vec![first]);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_task() {
        let store = memory_store().await;
        let service = services::TasksService::new(store.pool().unwrap());

        let result = service.create_task(create_request("", "to-do", "a@x.com")).await;
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
        assert!(service.list_tasks(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = memory_store().await;
        let service = services::TasksService::new(store.pool().unwrap());
        let task = service
            .create_task(create_request("Write docs", "to-do", "a@x.com"))
            .await
            .unwrap();

        let outcome = service
            .update_task(
                &task.id,
                UpdateTaskRequest {
                    description: Some(Some(TaskDescription::Text("README".to_string()))),
                    category: Some("in-progress".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome.matched_count, 1);
        assert_eq!(outcome.modified_count, 1);

        let stored = service.find_task(&task.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Write docs");
        assert_eq!(stored.category, "in-progress");
        assert_eq!(
            stored.description,
            Some(TaskDescription::Text("README".to_string()))
        );

        // Same values again change nothing
        let outcome = service
            .update_task(
                &task.id,
                UpdateTaskRequest {
                    category: Some("in-progress".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome.modified_count, 0);
    }

    #[tokio::test]
    async fn test_update_unknown_id_matches_nothing() {
        let store = memory_store().await;
        let service = services::TasksService::new(store.pool().unwrap());

        let outcome = service
            .update_task("T_MISSING", UpdateTaskRequest::default())
            .await
            .unwrap();
        assert_eq!(outcome.matched_count, 0);
        assert_eq!(outcome.modified_count, 0);
    }

    #[tokio::test]
    async fn test_update_with_null_description_clears_it() {
        let store = memory_store().await;
        let service = services::TasksService::new(store.pool().unwrap());
        let mut request = create_request("A", "to-do", "a@x.com");
        request.description = Some(TaskDescription::Text("draft".to_string()));
        let task = service.create_task(request).await.unwrap();

        // Leaving the field out keeps it
        let untouched = validators::parse_update_body(Some(json!({ "title": "B" }))).unwrap();
        assert!(untouched.description.is_none());
        service.update_task(&task.id, untouched).await.unwrap();
        let stored = service.find_task(&task.id).await.unwrap().unwrap();
        assert_eq!(stored.description, Some(TaskDescription::Text("draft".to_string())));

        let cleared = validators::parse_update_body(Some(json!({ "description": null }))).unwrap();
        assert_eq!(cleared.description, Some(None));
        let outcome = service.update_task(&task.id, cleared).await.unwrap();
        assert_eq!(outcome.modified_count, 1);

        let stored = service.find_task(&task.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "B");
        assert_eq!(stored.description, None);
    }

    #[tokio::test]
    async fn test_set_category_counts_only_changes() {
        let store = memory_store().await;
        let service = services::TasksService::new(store.pool().unwrap());
        let task = service
            .create_task(create_request("A", "to-do", "a@x.com"))
            .await
            .unwrap();

        assert_eq!(service.set_category(&task.id, "to-do").await.unwrap(), 0);
        assert_eq!(service.set_category(&task.id, "done").await.unwrap(), 1);
        assert_eq!(service.set_category("T_MISSING", "done").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let store = memory_store().await;
        let service = services::TasksService::new(store.pool().unwrap());
        let task = service
            .create_task(create_request("A", "to-do", "a@x.com"))
            .await
            .unwrap();

        assert_eq!(service.delete_task(&task.id).await.unwrap().deleted_count, 1);
        assert_eq!(service.delete_task(&task.id).await.unwrap().deleted_count, 0);
        assert!(service.find_task(&task.id).await.unwrap().is_none());
    }
}
