//! Tests for realtime module
//!
//! These tests verify:
//! - Bucket labeling and flattening order
//! - Event envelope decoding
//! - Snapshot processing against the store (updates, notification choice)
//! - The WebSocket round trip

#[cfg(test)]
mod tests {
    use crate::common::store::test_support::memory_store;
    use crate::common::{ApiError, AppState, Store};
    use crate::realtime::models::{BoardSnapshot, BoardTask, Bucket, ClientEvent, ServerEvent};
    use crate::realtime::services::board_service::synthesize_notifications;
    use crate::realtime::services::BoardService;
    use crate::tasks::models::CreateTaskRequest;
    use crate::tasks::services::TasksService;
    use serde_json::json;

    fn board_task(id: &str, title: &str, email: &str) -> BoardTask {
        BoardTask {
            id: id.to_string(),
            title: title.to_string(),
            email: email.to_string(),
        }
    }

    /// Insert a task with a fixed id and category
    async fn seed_task(store: &Store, id: &str, title: &str, category: &str) {
        sqlx::query(
            "INSERT INTO tasks (id, title, time_stamp, category, email) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(title)
        .bind("2024-01-01T00:00:00.000Z")
        .bind(category)
        .bind("a@x.com")
        .execute(&store.pool().unwrap())
        .await
        .unwrap();
    }

    async fn category_of(store: &Store, id: &str) -> String {
        let service = TasksService::new(store.pool().unwrap());
        service.find_task(id).await.unwrap().unwrap().category
    }

    async fn notification_count(store: &Store) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
            .fetch_one(&store.pool().unwrap())
            .await
            .unwrap()
    }

    // ========================================================================
    // Labeling
    // ========================================================================

    #[test]
    fn test_bucket_categories() {
        assert_eq!(Bucket::ToDo.category(), "to-do");
        assert_eq!(Bucket::InProgress.category(), "in-progress");
        assert_eq!(Bucket::Done.category(), "done");
    }

    #[test]
    fn test_labeled_order_is_todo_then_in_progress_then_done() {
        let snapshot = BoardSnapshot {
            to_do: vec![board_task("1", "A", "a@x.com"), board_task("2", "B", "a@x.com")],
            in_progress: vec![board_task("3", "C", "a@x.com")],
            done: vec![board_task("4", "D", "a@x.com")],
        };

        let labeled: Vec<(String, &str)> = snapshot
            .labeled()
            .into_iter()
            .map(|item| (item.task.id, item.category))
            .collect();

        assert_eq!(
            labeled,
            vec![
                ("1".to_string(), "to-do"),
                ("2".to_string(), "to-do"),
                ("3".to_string(), "in-progress"),
                ("4".to_string(), "done"),
            ]
        );
    }

    #[test]
    fn test_decode_tasks_event() {
        let raw = json!({
            "event": "tasks",
            "data": {
                "toDo": [],
                "InProgress": [
                    { "_id": "1", "title": "A", "email": "a@x.com", "category": "to-do" }
                ],
                "done": []
            }
        });

        let ClientEvent::Tasks(snapshot) = serde_json::from_value(raw).unwrap();
        assert!(snapshot.to_do.is_empty());
        assert_eq!(snapshot.in_progress, vec![board_task("1", "A", "a@x.com")]);
    }

    #[test]
    fn test_missing_buckets_default_to_empty() {
        let ClientEvent::Tasks(snapshot) =
            serde_json::from_value(json!({ "event": "tasks", "data": { "done": [] } })).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let result = serde_json::from_value::<ClientEvent>(json!({ "event": "chat", "data": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_synthesize_skips_unchanged_and_failed_updates() {
        let snapshot = BoardSnapshot {
            to_do: vec![board_task("1", "A", "a@x.com")],
            in_progress: vec![board_task("2", "B", "b@x.com")],
            done: vec![board_task("3", "C", "c@x.com")],
        };
        let labeled = snapshot.labeled();
        let outcomes: Vec<Result<u64, ApiError>> = vec![
            Ok(0),
            Err(ApiError::InternalServer("boom".to_string())),
            Ok(1),
        ];

        let notifications = synthesize_notifications(&labeled, &outcomes, "now");
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "C");
        assert_eq!(notifications[0].category, "done");
        assert_eq!(notifications[0].email, "c@x.com");
        assert_eq!(notifications[0].time_stamp, "now");
        assert_eq!(notifications[0].status, "unseen");
    }

    // ========================================================================
    // Snapshot processing
    // ========================================================================

    #[tokio::test]
    async fn test_move_to_in_progress_emits_notification() {
        let store = memory_store().await;
        seed_task(&store, "1", "A", "to-do").await;

        let service = BoardService::new(store.pool().unwrap());
        let snapshot = BoardSnapshot {
            in_progress: vec![board_task("1", "A", "a@x.com")],
            ..Default::default()
        };

        let notification = service.process_snapshot(&snapshot).await.unwrap();
        assert_eq!(notification.title, "A");
        assert_eq!(notification.category, "in-progress");
        assert_eq!(notification.status, "unseen");
        assert_eq!(notification.email, "a@x.com");
        assert!(chrono::DateTime::parse_from_rfc3339(&notification.time_stamp).is_ok());

        assert_eq!(category_of(&store, "1").await, "in-progress");
    }

    #[tokio::test]
    async fn test_every_task_takes_its_bucket_category() {
        let store = memory_store().await;
        seed_task(&store, "1", "A", "done").await;
        seed_task(&store, "2", "B", "to-do").await;
        seed_task(&store, "3", "C", "in-progress").await;
        seed_task(&store, "4", "D", "to-do").await;

        let service = BoardService::new(store.pool().unwrap());
        let snapshot = BoardSnapshot {
            to_do: vec![board_task("1", "A", "a@x.com")],
            in_progress: vec![board_task("2", "B", "a@x.com")],
            done: vec![board_task("3", "C", "a@x.com"), board_task("4", "D", "a@x.com")],
        };
        service.process_snapshot(&snapshot).await;

        assert_eq!(category_of(&store, "1").await, "to-do");
        assert_eq!(category_of(&store, "2").await, "in-progress");
        assert_eq!(category_of(&store, "3").await, "done");
        assert_eq!(category_of(&store, "4").await, "done");
    }

    #[tokio::test]
    async fn test_only_first_changed_task_is_announced() {
        let store = memory_store().await;
        seed_task(&store, "1", "Unchanged", "to-do").await;
        seed_task(&store, "2", "First change", "to-do").await;
        seed_task(&store, "3", "Second change", "to-do").await;

        let service = BoardService::new(store.pool().unwrap());
        let snapshot = BoardSnapshot {
            to_do: vec![board_task("1", "Unchanged", "a@x.com")],
            in_progress: vec![board_task("2", "First change", "a@x.com")],
            done: vec![board_task("3", "Second change", "a@x.com")],
        };

        let notification = service.process_snapshot(&snapshot).await.unwrap();
        assert_eq!(notification.title, "First change");
        assert_eq!(notification.category, "in-progress");

        // Both changes were still written
        assert_eq!(category_of(&store, "3").await, "done");
    }

    #[tokio::test]
    async fn test_unchanged_snapshot_emits_nothing() {
        let store = memory_store().await;
        seed_task(&store, "1", "A", "in-progress").await;

        let service = BoardService::new(store.pool().unwrap());
        let snapshot = BoardSnapshot {
            in_progress: vec![board_task("1", "A", "a@x.com")],
            ..Default::default()
        };

        assert!(service.process_snapshot(&snapshot).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_snapshot_touches_nothing() {
        let store = memory_store().await;
        seed_task(&store, "1", "A", "to-do").await;

        let service = BoardService::new(store.pool().unwrap());
        assert!(service
            .process_snapshot(&BoardSnapshot::default())
            .await
            .is_none());
        assert_eq!(category_of(&store, "1").await, "to-do");
    }

    #[tokio::test]
    async fn test_unknown_task_ids_are_skipped() {
        let store = memory_store().await;
        seed_task(&store, "2", "B", "to-do").await;

        let service = BoardService::new(store.pool().unwrap());
        let snapshot = BoardSnapshot {
            done: vec![board_task("missing", "X", "a@x.com"), board_task("2", "B", "a@x.com")],
            ..Default::default()
        };

        let notification = service.process_snapshot(&snapshot).await.unwrap();
        assert_eq!(notification.title, "B");
    }

    #[tokio::test]
    async fn test_record_notification_persists() {
        let store = memory_store().await;
        seed_task(&store, "1", "A", "to-do").await;

        let service = BoardService::new(store.pool().unwrap());
        let snapshot = BoardSnapshot {
            done: vec![board_task("1", "A", "a@x.com")],
            ..Default::default()
        };
        let notification = service.process_snapshot(&snapshot).await.unwrap();
        let stored = service.record_notification(&notification).await.unwrap();

        assert!(stored.id.starts_with("N_"));
        assert_eq!(stored.category, "done");
        assert_eq!(notification_count(&store).await, 1);
    }

    // ========================================================================
    // WebSocket round trip
    // ========================================================================

    mod websocket {
        use super::*;
        use futures_util::{SinkExt, StreamExt};
        use std::sync::Arc;
        use std::time::Duration;
        use tokio::net::TcpListener;
        use tokio::sync::RwLock;
        use tokio_tungstenite::{connect_async, tungstenite::Message};

        async fn spawn_server(store: Store) -> String {
            let shared = Arc::new(RwLock::new(AppState { store }));
            let config = crate::common::AppConfig::from_lookup(|_| None);
            let app = crate::app::build_router(shared, &config);

            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app.into_make_service()).await.unwrap();
            });

            format!("ws://{}/ws", addr)
        }

        async fn create_task(store: &Store, title: &str) -> String {
            TasksService::new(store.pool().unwrap())
                .create_task(CreateTaskRequest {
                    title: Some(title.to_string()),
                    category: Some("to-do".to_string()),
                    email: Some("a@x.com".to_string()),
                    ..Default::default()
                })
                .await
                .unwrap()
                .id
        }

        #[tokio::test]
        async fn test_snapshot_round_trip() {
            let store = memory_store().await;
            let task_id = create_task(&store, "A").await;
            let url = spawn_server(store.clone()).await;

            let (mut socket, _) = connect_async(url.as_str()).await.unwrap();

            let event = json!({
                "event": "tasks",
                "data": {
                    "toDo": [],
                    "InProgress": [{ "_id": task_id, "title": "A", "email": "a@x.com" }],
                    "done": []
                }
            });
            socket
                .send(Message::Text(event.to_string()))
                .await
                .unwrap();

            let reply = tokio::time::timeout(Duration::from_secs(5), socket.next())
                .await
                .expect("notification within 5s")
                .unwrap()
                .unwrap();
            let ServerEvent::Notification(notification) =
                serde_json::from_str(reply.to_text().unwrap()).unwrap();

            assert_eq!(notification.title, "A");
            assert_eq!(notification.category, "in-progress");
            assert_eq!(notification.status, "unseen");
            assert_eq!(notification.email, "a@x.com");
            assert_eq!(category_of(&store, &task_id).await, "in-progress");

            // Persisted right after the emit
            let mut stored = 0;
            for _ in 0..50 {
                stored = notification_count(&store).await;
                if stored == 1 {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            assert_eq!(stored, 1);
        }

        #[tokio::test]
        async fn test_malformed_event_keeps_connection_open() {
            let store = memory_store().await;
            let task_id = create_task(&store, "B").await;
            let url = spawn_server(store.clone()).await;

            let (mut socket, _) = connect_async(url.as_str()).await.unwrap();

            socket
                .send(Message::Text("not json".to_string()))
                .await
                .unwrap();
            socket
                .send(Message::Text(json!({ "event": "chat", "data": {} }).to_string()))
                .await
                .unwrap();

            // Nothing is echoed back for the bad frames
            let silent = tokio::time::timeout(Duration::from_millis(200), socket.next()).await;
            assert!(silent.is_err());

            let event = json!({
                "event": "tasks",
                "data": { "done": [{ "_id": task_id, "title": "B", "email": "a@x.com" }] }
            });
            socket
                .send(Message::Text(event.to_string()))
                .await
                .unwrap();

            let reply = tokio::time::timeout(Duration::from_secs(5), socket.next())
                .await
                .expect("notification within 5s")
                .unwrap()
                .unwrap();
            let ServerEvent::Notification(notification) =
                serde_json::from_str(reply.to_text().unwrap()).unwrap();
            assert_eq!(notification.category, "done");
        }
    }
}
