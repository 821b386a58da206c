use rand::Rng;

use crate::error::GameResult;
use crate::state::AppState;
use crate::types::PlayerId;

/// Canned responses for AI players. Stands in for a real model; the point is
/// only that AI answers land in the same place human answers do.
pub const CANNED_AI_ANSWERS: &[&str] = &[
    "Life is a complex neural network of possibilities.",
    "Humans often seek purpose, but do we really need one?",
    "I believe the answer lies in optimization of resources.",
    "Why do you ask? Does it truly matter?",
    "Consciousness is merely a collection of patterns.",
];

impl AppState {
    /// Record an answer for every AI player in the roster, chosen uniformly
    /// at random from the canned pool, exactly as a human answer would be
    /// recorded. No broadcast; callers decide when to run this relative to
    /// the round start. Returns how many answers were written.
    pub async fn generate_ai_answers(&self, room_id: &str) -> GameResult<usize> {
        let room = self.room(room_id).await?;
        let mut room = room.lock().await;

        let ai_players: Vec<PlayerId> = room
            .players
            .iter()
            .filter(|(_, p)| p.is_ai)
            .map(|(id, _)| id.clone())
            .collect();

        let mut rng = rand::rng();
        for id in &ai_players {
            let answer = CANNED_AI_ANSWERS[rng.random_range(0..CANNED_AI_ANSWERS.len())];
            room.answers.insert(id.clone(), answer.to_string());
        }
        room.touch();

        Ok(ai_players.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ai_answers_fill_only_ai_players() {
        let state = AppState::new();
        let room_id = state.create_room().await;
        state.join_room(&room_id, "human", None, false).await.unwrap();
        state.join_room(&room_id, "bot1", None, true).await.unwrap();
        state.join_room(&room_id, "bot2", None, true).await.unwrap();

        let generated = state.generate_ai_answers(&room_id).await.unwrap();
        assert_eq!(generated, 2);

        let room = state.room(&room_id).await.unwrap();
        let room = room.lock().await;
        assert_eq!(room.answers.len(), 2);
        assert!(!room.answers.contains_key("human"));
        for bot in ["bot1", "bot2"] {
            assert!(CANNED_AI_ANSWERS.contains(&room.answers[bot].as_str()));
        }
    }

    #[tokio::test]
    async fn test_ai_answers_leave_human_answers_untouched() {
        let state = AppState::new();
        let room_id = state.create_room().await;
        state.join_room(&room_id, "human", None, false).await.unwrap();
        state.join_room(&room_id, "bot", None, true).await.unwrap();

        state
            .submit_answer(&room_id, "human", "my own words".to_string())
            .await
            .unwrap();
        state.generate_ai_answers(&room_id).await.unwrap();

        let room = state.room(&room_id).await.unwrap();
        assert_eq!(room.lock().await.answers["human"], "my own words");
    }

    #[tokio::test]
    async fn test_ai_answers_noop_without_ai_players() {
        let state = AppState::new();
        let room_id = state.create_room().await;
        state.join_room(&room_id, "human", None, false).await.unwrap();

        let generated = state.generate_ai_answers(&room_id).await.unwrap();
        assert_eq!(generated, 0);
    }
}
