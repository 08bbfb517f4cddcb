use crate::common::generate_connection_id;
use crate::common::state::AppState;
use crate::realtime::models::{BoardSnapshot, ClientEvent, ServerEvent};
use crate::realtime::services::{BoardService, ChannelError};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        WebSocketUpgrade,
    },
    response::IntoResponse,
    Extension,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, error, info, warn};

/// WebSocket upgrade handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state_lock))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, state_lock: Arc<RwLock<AppState>>) {
    let connection_id = generate_connection_id();

    info!(connection_id = %connection_id, "Realtime connection established");

    let (mut sender, mut receiver) = socket.split();

    // Outbound events for this connection funnel through one channel
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let connection_id_clone = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    // Every event is handled on its own task so a slow batch
                    // never holds up the next one
                    tokio::spawn(handle_event(
                        text,
                        connection_id_clone.clone(),
                        tx.clone(),
                        state_lock.clone(),
                    ));
                }
                Message::Binary(_) => {
                    warn!(
                        connection_id = %connection_id_clone,
                        "Received unsupported binary message"
                    );
                }
                Message::Ping(_) | Message::Pong(_) => {
                    debug!(connection_id = %connection_id_clone, "Heartbeat");
                }
                Message::Close(_) => {
                    debug!(connection_id = %connection_id_clone, "Received close message");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    info!(connection_id = %connection_id, "Realtime connection closed");
}

/// Handle one inbound text frame. Failures are logged only; the client
/// never sees them and the connection stays open.
async fn handle_event(
    text: String,
    connection_id: String,
    tx: mpsc::UnboundedSender<Message>,
    state_lock: Arc<RwLock<AppState>>,
) {
    if let Err(e) = dispatch_event(&text, &connection_id, &tx, &state_lock).await {
        error!(
            connection_id = %connection_id,
            error = %e,
            "Error handling realtime event"
        );
    }
}

async fn dispatch_event(
    text: &str,
    connection_id: &str,
    tx: &mpsc::UnboundedSender<Message>,
    state_lock: &Arc<RwLock<AppState>>,
) -> Result<(), ChannelError> {
    let event: ClientEvent = serde_json::from_str(text)?;

    match event {
        ClientEvent::Tasks(snapshot) => {
            handle_board_snapshot(snapshot, connection_id, tx, state_lock).await
        }
    }
}

/// Apply a board snapshot, then emit and persist at most one notification
async fn handle_board_snapshot(
    snapshot: BoardSnapshot,
    connection_id: &str,
    tx: &mpsc::UnboundedSender<Message>,
    state_lock: &Arc<RwLock<AppState>>,
) -> Result<(), ChannelError> {
    let pool = state_lock.read().await.store.pool()?;
    let board_service = BoardService::new(pool);

    let Some(notification) = board_service.process_snapshot(&snapshot).await else {
        return Ok(());
    };

    let payload = serde_json::to_string(&ServerEvent::Notification(notification.clone()))?;
    if tx.send(Message::Text(payload)).is_err() {
        warn!(
            connection_id = %connection_id,
            "Connection closed before the notification could be sent"
        );
    } else {
        debug!(
            connection_id = %connection_id,
            category = %notification.category,
            "Notification sent"
        );
    }

    board_service.record_notification(&notification).await?;

    Ok(())
}
