use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;

/// WebSocket upgrade handler for `/ws/{room_id}/{player_id}`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path((room_id, player_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    tracing::info!(
        "WebSocket connection request: room={}, player={}",
        room_id,
        player_id
    );

    ws.on_upgrade(move |socket| handle_socket(socket, room_id, player_id, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, room_id: String, player_id: String, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Opening the socket implicitly joins the player (idempotent). An
    // unknown room gets an error payload and no registry entry.
    let snapshot = match state.join_room(&room_id, &player_id, None, false).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("Rejecting socket for {}: {}", room_id, e);
            if let Ok(json) = serde_json::to_string(&e.to_message()) {
                let _ = sender.send(Message::Text(json.into())).await;
            }
            return;
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = state.registry.connect(&room_id, tx).await;

    // Resync the newly joined client before any broadcast arrives
    let welcome = ServerMessage::Welcome {
        room_id: snapshot.room_id,
        question: snapshot.question,
        players: snapshot.players,
    };
    if let Ok(json) = serde_json::to_string(&welcome) {
        if sender.send(Message::Text(json.into())).await.is_err() {
            tracing::error!("Failed to send welcome message");
            state.registry.disconnect(&room_id, handle).await;
            return;
        }
    }

    loop {
        tokio::select! {
            // Room broadcasts queued by the registry
            outbound = rx.recv() => {
                match outbound {
                    Some(msg) => {
                        if let Ok(json) = serde_json::to_string(&msg) {
                            if sender.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                    }
                    None => break,
                }
            }

            // Client messages
            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(msg) => {
                                if let Some(reply) =
                                    dispatch_message(&state, &room_id, &player_id, msg).await
                                {
                                    if let Ok(json) = serde_json::to_string(&reply) {
                                        if sender.send(Message::Text(json.into())).await.is_err() {
                                            break;
                                        }
                                    }
                                }
                            }
                            Err(e) => {
                                // Unknown or missing action: drop it, don't error
                                tracing::debug!("Ignoring malformed message: {}", e);
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("WebSocket closed");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    // Exactly one disconnect per session, whatever ended the loop
    state.registry.disconnect(&room_id, handle).await;
    tracing::info!(
        "WebSocket connection closed for player {} in room {}",
        player_id,
        room_id
    );
}

/// Dispatch one inbound message to the room state machine. Returns an error
/// payload for the sending client only; successful operations reply through
/// the room broadcast instead.
pub async fn dispatch_message(
    state: &Arc<AppState>,
    room_id: &str,
    player_id: &str,
    msg: ClientMessage,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::SubmitAnswer { answer } => {
            match state.submit_answer(room_id, player_id, answer).await {
                Ok(()) => None,
                Err(e) => Some(e.to_message()),
            }
        }

        ClientMessage::SubmitVote { target } => {
            match state.submit_vote(room_id, player_id, &target).await {
                Ok(_) => None,
                Err(e) => Some(e.to_message()),
            }
        }
    }
}
