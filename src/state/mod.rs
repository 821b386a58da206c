mod ai;
mod room;
mod vote;

pub use ai::CANNED_AI_ANSWERS;
pub use vote::plurality_leader;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::error::{GameError, GameResult};
use crate::prompts;
use crate::registry::ConnectionRegistry;
use crate::types::{Room, RoomId};

/// Shared application state: the room store plus the connection registry.
///
/// The outer map lock is only held to resolve a room; every game operation
/// runs under that room's own mutex, so two messages for the same room are
/// serialized while distinct rooms proceed concurrently.
#[derive(Clone)]
pub struct AppState {
    rooms: Arc<RwLock<HashMap<RoomId, Arc<Mutex<Room>>>>>,
    pub registry: Arc<ConnectionRegistry>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
            registry: Arc::new(ConnectionRegistry::new()),
        }
    }

    /// Allocate a fresh room, insert an empty record, and immediately start
    /// round 1 with a prompt from the pool. Returns the room id.
    pub async fn create_room(&self) -> RoomId {
        let id = self.allocate_room_id().await;
        // The room was just inserted; a failure here would be a bug
        if let Err(e) = self.start_round(&id, prompts::random_question()).await {
            tracing::error!("Failed to start first round in room {}: {}", id, e);
        }
        id
    }

    /// First 8 hex chars of a random UUID, retried until unique among live
    /// rooms. Collisions are astronomically unlikely at party scale, but the
    /// retry costs nothing.
    async fn allocate_room_id(&self) -> RoomId {
        let mut rooms = self.rooms.write().await;
        loop {
            let id: RoomId = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
            if !rooms.contains_key(&id) {
                rooms.insert(id.clone(), Arc::new(Mutex::new(Room::new(id.clone()))));
                return id;
            }
        }
    }

    /// Resolve a room handle without holding the map lock afterwards
    pub(crate) async fn room(&self, room_id: &str) -> GameResult<Arc<Mutex<Room>>> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .cloned()
            .ok_or_else(|| GameError::RoomNotFound(room_id.to_string()))
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Remove every room with zero live connections whose last activity is
    /// older than `ttl`. Returns the removed ids. This is the whole expiry
    /// policy; the sweeper task just calls it on an interval.
    pub async fn sweep_expired(&self, ttl: Duration) -> Vec<RoomId> {
        let mut rooms = self.rooms.write().await;
        let mut expired = Vec::new();
        for (id, room) in rooms.iter() {
            if self.registry.connection_count(id).await > 0 {
                continue;
            }
            if room.lock().await.last_activity.elapsed() >= ttl {
                expired.push(id.clone());
            }
        }
        for id in &expired {
            rooms.remove(id);
        }
        expired
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
