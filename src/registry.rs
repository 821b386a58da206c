//! Connection registry: room id -> live session handles.
//!
//! The registry knows nothing about game semantics. Each handle is the
//! sending half of an unbounded channel; the socket task that owns the
//! receiving half performs the actual I/O, so a slow peer never stalls a
//! broadcast for the rest of the room.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;

use crate::protocol::ServerMessage;
use crate::types::RoomId;

pub type HandleId = u64;

#[derive(Debug, Clone)]
struct SessionHandle {
    id: HandleId,
    tx: UnboundedSender<ServerMessage>,
}

/// Tracks which session handles belong to which room and delivers messages
/// to all of them. Handles are kept in registration order.
pub struct ConnectionRegistry {
    rooms: RwLock<HashMap<RoomId, Vec<SessionHandle>>>,
    next_handle: AtomicU64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            next_handle: AtomicU64::new(1),
        }
    }

    /// Register a handle under a room, creating the room's entry if absent.
    pub async fn connect(&self, room_id: &str, tx: UnboundedSender<ServerMessage>) -> HandleId {
        let id = self.next_handle.fetch_add(1, Ordering::Relaxed);
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room_id.to_string())
            .or_default()
            .push(SessionHandle { id, tx });
        id
    }

    /// Remove a handle from a room. Removing a handle that is already gone
    /// is a no-op, so a double disconnect never faults. The room's entry is
    /// dropped once its last handle leaves.
    pub async fn disconnect(&self, room_id: &str, handle: HandleId) {
        let mut rooms = self.rooms.write().await;
        if let Some(handles) = rooms.get_mut(room_id) {
            handles.retain(|h| h.id != handle);
            if handles.is_empty() {
                rooms.remove(room_id);
            }
        }
    }

    /// Deliver a message to every handle in the room, in registration order.
    /// A room with no connections is a silent no-op. A handle whose peer has
    /// vanished doesn't abort delivery to the rest; stale handles are pruned
    /// after the loop.
    pub async fn broadcast(&self, room_id: &str, msg: &ServerMessage) {
        let handles: Vec<SessionHandle> = {
            let rooms = self.rooms.read().await;
            match rooms.get(room_id) {
                Some(handles) => handles.clone(),
                None => return,
            }
        };

        let mut stale = Vec::new();
        for handle in &handles {
            if handle.tx.send(msg.clone()).is_err() {
                tracing::debug!(
                    "Dropping stale connection {} in room {}",
                    handle.id,
                    room_id
                );
                stale.push(handle.id);
            }
        }

        for id in stale {
            self.disconnect(room_id, id).await;
        }
    }

    /// Number of live handles in a room (0 for unknown rooms)
    pub async fn connection_count(&self, room_id: &str) -> usize {
        self.rooms
            .read()
            .await
            .get(room_id)
            .map_or(0, |handles| handles.len())
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn text_of(msg: &ServerMessage) -> &str {
        match msg {
            ServerMessage::AnswerReceived { answer, .. } => answer,
            _ => panic!("unexpected message"),
        }
    }

    fn answer_msg(text: &str) -> ServerMessage {
        ServerMessage::AnswerReceived {
            player: "p1".to_string(),
            answer: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_handles_in_order() {
        let registry = ConnectionRegistry::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        registry.connect("room", tx1).await;
        registry.connect("room", tx2).await;

        registry.broadcast("room", &answer_msg("first")).await;
        registry.broadcast("room", &answer_msg("second")).await;

        for rx in [&mut rx1, &mut rx2] {
            assert_eq!(text_of(&rx.try_recv().unwrap()), "first");
            assert_eq!(text_of(&rx.try_recv().unwrap()), "second");
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_broadcast_to_empty_room_is_noop() {
        let registry = ConnectionRegistry::new();
        registry.broadcast("nowhere", &answer_msg("hello")).await;
        assert_eq!(registry.connection_count("nowhere").await, 0);
    }

    #[tokio::test]
    async fn test_stale_handle_does_not_block_the_rest() {
        let registry = ConnectionRegistry::new();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        registry.connect("room", tx1).await;
        registry.connect("room", tx2).await;
        registry.connect("room", tx3).await;

        // Peer vanished without a clean disconnect
        drop(rx1);

        registry.broadcast("room", &answer_msg("still here")).await;

        assert_eq!(text_of(&rx2.try_recv().unwrap()), "still here");
        assert_eq!(text_of(&rx3.try_recv().unwrap()), "still here");
        // Stale handle was reaped
        assert_eq!(registry.connection_count("room").await, 2);
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let registry = ConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let handle = registry.connect("room", tx).await;

        registry.disconnect("room", handle).await;
        assert_eq!(registry.connection_count("room").await, 0);

        // Second removal must be a no-op, not a fault
        registry.disconnect("room", handle).await;
        registry.disconnect("never-existed", handle).await;
    }

    #[tokio::test]
    async fn test_empty_room_entry_is_pruned() {
        let registry = ConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let handle = registry.connect("room", tx).await;
        assert_eq!(registry.connection_count("room").await, 1);

        registry.disconnect("room", handle).await;
        assert!(registry.rooms.read().await.get("room").is_none());
    }
}
