use std::sync::Arc;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Spawn a background task that periodically removes expired rooms: no live
/// connections and no activity for longer than the configured TTL.
pub fn spawn_room_sweeper(state: Arc<AppState>, config: &ServerConfig) {
    let ttl = config.room_ttl;
    let interval = config.sweep_interval;

    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;

            let removed = state.sweep_expired(ttl).await;
            if !removed.is_empty() {
                tracing::info!("Expired {} idle room(s): {:?}", removed.len(), removed);
            }
        }
    });
}
