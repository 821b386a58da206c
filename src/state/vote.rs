use std::collections::HashMap;

use crate::error::{GameError, GameResult};
use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::{Elimination, PlayerId};

/// Current plurality leader of a vote tally, with the number of votes cast
/// for them. Ties on the maximum count break to the lowest player id, so the
/// result never depends on map iteration order.
pub fn plurality_leader(votes: &HashMap<PlayerId, PlayerId>) -> Option<(PlayerId, u32)> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for target in votes.values() {
        *counts.entry(target.as_str()).or_insert(0) += 1;
    }

    let mut leader: Option<(&str, u32)> = None;
    for (id, n) in counts {
        leader = match leader {
            Some((lead_id, lead_n)) if n < lead_n || (n == lead_n && lead_id < id) => {
                Some((lead_id, lead_n))
            }
            _ => Some((id, n)),
        };
    }
    leader.map(|(id, n)| (id.to_string(), n))
}

impl AppState {
    /// Record a vote (overwrite semantics, like answers), recompute the
    /// plurality leader, and broadcast `vote_submitted` followed by
    /// `elimination` naming the leader. Both voter and target must be
    /// roster members.
    pub async fn submit_vote(
        &self,
        room_id: &str,
        voter_id: &str,
        target_id: &str,
    ) -> GameResult<Elimination> {
        let room = self.room(room_id).await?;
        let mut room = room.lock().await;

        for id in [voter_id, target_id] {
            if !room.players.contains_key(id) {
                return Err(GameError::UnknownPlayer {
                    room: room_id.to_string(),
                    player: id.to_string(),
                });
            }
        }

        room.votes
            .insert(voter_id.to_string(), target_id.to_string());
        room.touch();

        let (eliminated, votes) = match plurality_leader(&room.votes) {
            Some(leader) => leader,
            None => unreachable!("tally is non-empty after the insert above"),
        };
        let elimination = Elimination {
            was_ai: room.players[&eliminated].is_ai,
            eliminated,
            votes,
        };

        self.registry
            .broadcast(
                room_id,
                &ServerMessage::VoteSubmitted {
                    voter: voter_id.to_string(),
                },
            )
            .await;
        self.registry
            .broadcast(
                room_id,
                &ServerMessage::Elimination {
                    eliminated: elimination.eliminated.clone(),
                    was_ai: elimination.was_ai,
                    votes: elimination.votes,
                },
            )
            .await;

        Ok(elimination)
    }
}
