//! WebSocket Stream Handler
//!
//! Upgrades an authorized request into a live subscription on one
//! conversation's broadcast channel. The stream is one-way: committed
//! messages flow to the client as JSON text frames, and anything the
//! client sends other than close/ping is ignored.
//!
//! Authorization happens before the upgrade, so an anonymous caller or
//! a non-participant gets the usual error response instead of a dead
//! socket. Membership is not re-checked while the stream is open; a
//! removed participant keeps receiving until they disconnect.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};

use crate::application::context::AuthContext;
use crate::infrastructure::broadcast::Subscription;
use crate::infrastructure::metrics;
use crate::presentation::http::handlers::conversation::conversation_service;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// WebSocket upgrade handler for `/conversation/{id}/stream`
pub async fn stream_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(conversation_id): Path<i64>,
) -> Result<Response, AppError> {
    conversation_service(&state)
        .authorize_stream(&ctx, conversation_id)
        .await?;

    let subscription = state.exchange.subscribe(conversation_id).await?;

    Ok(ws.on_upgrade(move |socket| run_stream(socket, subscription, conversation_id)))
}

/// Pump broadcast payloads into the socket until either side closes.
async fn run_stream(socket: WebSocket, mut subscription: Subscription, conversation_id: i64) {
    metrics::STREAM_CONNECTIONS_ACTIVE.inc();
    tracing::debug!(conversation_id, "Stream opened");

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            payload = subscription.next() => {
                let Some(bytes) = payload else { break };
                // Payloads are serialized MessageResponse JSON; anything
                // that is not valid UTF-8 is dropped rather than sent raw.
                let Ok(text) = String::from_utf8(bytes) else { continue };
                if sender.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            inbound = receiver.next() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => continue,
                }
            }
        }
    }

    metrics::STREAM_CONNECTIONS_ACTIVE.dec();
    tracing::debug!(conversation_id, "Stream closed");
}
