use crate::error::{GameError, GameResult};
use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::{Player, RoomPhase, RoomSnapshot};

impl AppState {
    /// Register a player in the room's roster (idempotent; re-joining with
    /// the same id overwrites the record) and return a resync snapshot.
    pub async fn join_room(
        &self,
        room_id: &str,
        player_id: &str,
        name: Option<String>,
        is_ai: bool,
    ) -> GameResult<RoomSnapshot> {
        let room = self.room(room_id).await?;
        let mut room = room.lock().await;

        room.players.insert(
            player_id.to_string(),
            Player {
                name: name.unwrap_or_else(|| player_id.to_string()),
                is_ai,
            },
        );
        room.touch();

        Ok(RoomSnapshot {
            room_id: room.id.clone(),
            question: room.current_question.clone(),
            players: room.roster(),
        })
    }

    /// Read-only resync view of a room
    pub async fn snapshot(&self, room_id: &str) -> GameResult<RoomSnapshot> {
        let room = self.room(room_id).await?;
        let room = room.lock().await;
        Ok(RoomSnapshot {
            room_id: room.id.clone(),
            question: room.current_question.clone(),
            players: room.roster(),
        })
    }

    /// Post a new question and reset the round: answers and votes are
    /// cleared together. Broadcasts `new_question` to the room.
    pub async fn start_round(&self, room_id: &str, prompt: &str) -> GameResult<String> {
        let room = self.room(room_id).await?;
        let mut room = room.lock().await;

        room.current_question = Some(prompt.to_string());
        room.phase = RoomPhase::Collecting;
        room.answers.clear();
        room.votes.clear();
        room.touch();

        let msg = ServerMessage::NewQuestion {
            question: prompt.to_string(),
            players: room.roster(),
        };
        self.registry.broadcast(room_id, &msg).await;

        Ok(prompt.to_string())
    }

    /// Record a player's answer for the current round. Last write wins;
    /// a duplicate submission is an overwrite, not a rejection. The answer
    /// text is echoed to the whole room in the `answer_received` broadcast.
    pub async fn submit_answer(
        &self,
        room_id: &str,
        player_id: &str,
        answer: String,
    ) -> GameResult<()> {
        let room = self.room(room_id).await?;
        let mut room = room.lock().await;

        if !room.players.contains_key(player_id) {
            return Err(GameError::UnknownPlayer {
                room: room_id.to_string(),
                player: player_id.to_string(),
            });
        }

        room.answers.insert(player_id.to_string(), answer.clone());
        room.touch();

        let msg = ServerMessage::AnswerReceived {
            player: player_id.to_string(),
            answer,
        };
        self.registry.broadcast(room_id, &msg).await;

        Ok(())
    }
}
