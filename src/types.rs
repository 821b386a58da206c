use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

/// Opaque ID types for type safety
pub type RoomId = String;
pub type PlayerId = String;

/// A roster entry. AI players get their answers filled in by the canned
/// responder instead of a connected client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub is_ai: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomPhase {
    /// No question posted yet
    Idle,
    /// Question posted, answers and votes being gathered
    Collecting,
}

/// Per-room game state. Connections are tracked separately in the
/// `ConnectionRegistry`; a room record never holds transport handles.
#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    pub phase: RoomPhase,
    pub players: HashMap<PlayerId, Player>,
    pub current_question: Option<String>,
    pub answers: HashMap<PlayerId, String>,
    pub votes: HashMap<PlayerId, PlayerId>,
    /// Updated on every state-mutating operation and on disconnect.
    /// Drives the TTL expiry policy.
    pub last_activity: Instant,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            phase: RoomPhase::Idle,
            players: HashMap::new(),
            current_question: None,
            answers: HashMap::new(),
            votes: HashMap::new(),
            last_activity: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Roster ids in a stable order for snapshots and broadcasts
    pub fn roster(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self.players.keys().cloned().collect();
        ids.sort();
        ids
    }
}

/// Resync view returned to a joining client so it doesn't have to wait for
/// the next broadcast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub question: Option<String>,
    pub players: Vec<PlayerId>,
}

/// Outcome of a vote tally: the current plurality leader
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Elimination {
    pub eliminated: PlayerId,
    pub was_ai: bool,
    pub votes: u32,
}
