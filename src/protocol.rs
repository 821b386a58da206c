use serde::{Deserialize, Serialize};

use crate::types::{PlayerId, RoomId};

/// Inbound messages on the per-room WebSocket. The sender's identity comes
/// from the connection path (`/ws/{room_id}/{player_id}`), not the payload.
/// A message with an unrecognized or missing `action` fails to decode and is
/// dropped by the socket loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMessage {
    SubmitAnswer { answer: String },
    SubmitVote { target: PlayerId },
}

/// Outbound messages. `Welcome` is connection-scoped (sent only to the
/// joining socket); the rest are room broadcasts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        room_id: RoomId,
        question: Option<String>,
        players: Vec<PlayerId>,
    },
    NewQuestion {
        question: String,
        players: Vec<PlayerId>,
    },
    AnswerReceived {
        player: PlayerId,
        answer: String,
    },
    VoteSubmitted {
        voter: PlayerId,
    },
    Elimination {
        eliminated: PlayerId,
        was_ai: bool,
        votes: u32,
    },
    Error {
        code: String,
        msg: String,
    },
}
