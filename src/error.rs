use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::protocol::ServerMessage;
use crate::types::{PlayerId, RoomId};

/// Result type for room operations
pub type GameResult<T> = Result<T, GameError>;

/// Errors surfaced to callers of the room state machine. None of these are
/// fatal to the process and none trigger a broadcast.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum GameError {
    #[error("Room does not exist: {0}")]
    RoomNotFound(RoomId),

    #[error("Player {player} is not registered in room {room}")]
    UnknownPlayer { room: RoomId, player: PlayerId },
}

impl GameError {
    pub fn code(&self) -> &'static str {
        match self {
            GameError::RoomNotFound(_) => "ROOM_NOT_FOUND",
            GameError::UnknownPlayer { .. } => "UNKNOWN_PLAYER",
        }
    }

    /// Error payload for the WebSocket side of the protocol
    pub fn to_message(&self) -> ServerMessage {
        ServerMessage::Error {
            code: self.code().to_string(),
            msg: self.to_string(),
        }
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = match &self {
            GameError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            GameError::UnknownPlayer { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
