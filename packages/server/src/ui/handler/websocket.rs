//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::{HeaderMap, header::AUTHORIZATION},
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    infrastructure::{
        auth::bearer_token,
        dto::websocket::{ServerMessage, UNAUTHORIZED},
    },
    ui::{
        router::EventRouter,
        state::{AppState, ConnectQuery},
    },
    usecase::{ConnectClientUseCase, DisconnectClientUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    // `?token=` wins over the Authorization header
    let token = query.token.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_string)
    });

    ws.on_upgrade(move |socket| handle_socket(socket, state, token))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, token: Option<String>) {
    // Create a channel for this client to receive messages
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let connect_usecase =
        ConnectClientUseCase::new(state.token_verifier.clone(), state.registry.clone());
    let (connection_id, identity) = match connect_usecase.execute(token.as_deref(), tx).await {
        Ok(connection) => connection,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting websocket connection");
            reject_socket(socket).await;
            return;
        }
    };

    let (mut sender, mut receiver) = socket.split();
    let router = EventRouter::new(state.clone());
    let recv_identity = identity.clone();

    // Inbound frames are processed one at a time, in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!(%connection_id, "WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    router
                        .handle(&connection_id, &recv_identity, text.as_str())
                        .await;
                }
                Message::Binary(bytes) => {
                    // Non UTF-8 payloads are reported as malformed by the router
                    let text = std::str::from_utf8(&bytes).unwrap_or_default();
                    router.handle(&connection_id, &recv_identity, text).await;
                }
                Message::Close(_) => {
                    tracing::info!(%connection_id, "client requested close");
                    break;
                }
                _ => {}
            }
        }
    });

    // Drain this connection's outbound queue
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    DisconnectClientUseCase::new(state.registry.clone())
        .execute(&connection_id)
        .await;
    tracing::info!(
        %connection_id,
        user_id = %identity.user_id,
        "client disconnected"
    );
}

/// Report the failed handshake on the upgraded socket, then close it.
async fn reject_socket(mut socket: WebSocket) {
    match serde_json::to_string(&ServerMessage::error(UNAUTHORIZED)) {
        Ok(json) => {
            if let Err(e) = socket.send(Message::Text(json.into())).await {
                tracing::debug!("failed to send handshake error: {}", e);
                return;
            }
        }
        Err(e) => tracing::warn!(error = %e, "failed to serialize handshake error"),
    }

    let close = Message::Close(Some(CloseFrame {
        code: close_code::POLICY,
        reason: "unauthorized".into(),
    }));
    if let Err(e) = socket.send(close).await {
        tracing::debug!("failed to close rejected socket: {}", e);
    }
}
