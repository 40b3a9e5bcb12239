use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::app_state::AppState;

/// Attaches the socket to the provider's notification channel: every
/// message published for that provider is pushed down the wire.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(provider_id): Path<Uuid>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let rx = state.notifier.subscribe(provider_id);
    debug!(%provider_id, "websocket listener attached");
    ws.on_upgrade(move |socket| handle_socket(socket, rx))
}

async fn handle_socket(socket: WebSocket, mut rx: broadcast::Receiver<String>) {
    // Split the socket into sender and receiver
    let (mut sender, mut receiver) = socket.split();

    // Drain inbound frames until the client hangs up; listeners only read.
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    // Forward notifications from the broadcast channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Ok(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = recv_task => {},
        _ = send_task => {},
    }
}
