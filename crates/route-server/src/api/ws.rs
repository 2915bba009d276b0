//! WebSocket stream of display-model updates.
use crate::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, Default)]
pub struct WsQuery {
    session_id: Option<String>,
}

/// Handler for WebSocket connections.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(params): Query<WsQuery>,
) -> axum::response::Response {
    let session_filter = params.session_id;
    ws.on_upgrade(move |socket| handle_socket(socket, state, session_filter))
        .into_response()
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, session_filter: Option<String>) {
    let mut rx = state.tx.subscribe();
    tracing::debug!("Stream subscriber connected");

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Ping(payload))) => {
                        if socket.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }
            update = rx.recv() => {
                match update {
                    Ok(msg) => {
                        if let Some(wanted) = session_filter.as_deref() {
                            if msg.session_id.as_deref() != Some(wanted) {
                                continue;
                            }
                        }
                        if socket.send(Message::Text(msg.payload.as_ref().to_owned())).await.is_err() {
                            break;
                        }
                    }
                    // Only the latest model matters
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(_) => break,
                }
            }
        }
    }

    tracing::debug!("Stream subscriber disconnected");
}
