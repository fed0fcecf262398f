//! WebSocket endpoint for watching a link token.
//!
//! Connection lifecycle:
//! 1. Parse the token and subscribe before upgrading, so no event published
//!    after the handshake is missed
//! 2. Forward hub events as text frames
//! 3. Ignore inbound frames until Close
//! 4. Drop the subscription when either side ends

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::adapters::events::{LinkageHub, LinkageSubscription};
use crate::adapters::http::ApiError;
use crate::domain::foundation::LinkToken;

use super::messages::linkage_frame;

#[derive(Debug, Deserialize)]
pub struct LinkageParams {
    pub token: String,
}

/// GET /api/auth/telegram-linkage?token=<token>
pub async fn linkage_ws_handler(
    Query(params): Query<LinkageParams>,
    State(hub): State<LinkageHub>,
    ws: WebSocketUpgrade,
) -> Response {
    let token: LinkToken = match params.token.parse() {
        Ok(token) => token,
        Err(_) => return ApiError::bad_request("Invalid token").into_response(),
    };

    let subscription = hub.subscribe(token);
    ws.on_upgrade(move |socket| handle_socket(socket, subscription))
}

async fn handle_socket(socket: WebSocket, mut subscription: LinkageSubscription) {
    let token = subscription.token();
    let (mut sender, mut receiver) = socket.split();

    // Hub → client. Owns the subscription, so ending this task releases it.
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            if let Err(e) = sender.send(Message::Text(linkage_frame(&event))).await {
                tracing::debug!(token = %token, "Send error, closing connection: {}", e);
                return;
            }
        }
        // Hub dropped us (lagging); tell the client we are done
        if let Err(e) = sender.close().await {
            tracing::trace!(token = %token, "Close after hub drop failed: {}", e);
        }
    });

    // Client → server. Only Close matters.
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => {
                    tracing::debug!(token = %token, "Client sent close frame");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(token = %token, "Receive error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::debug!(token = %token, "linkage socket closed");
}
