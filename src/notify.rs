use dashmap::DashMap;
use tokio::sync::broadcast;
use ulid::Ulid;

use crate::model::DiaryChange;

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub for open diary views: one channel per room.
pub struct NotifyHub {
    channels: DashMap<Ulid, broadcast::Sender<DiaryChange>>,
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to changes for a room. Creates the channel if needed.
    pub fn subscribe(&self, room_id: Ulid) -> broadcast::Receiver<DiaryChange> {
        let sender = self
            .channels
            .entry(room_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send a change notification. No-op if nobody is watching the room.
    pub fn send(&self, room_id: Ulid, change: &DiaryChange) {
        if let Some(sender) = self.channels.get(&room_id) {
            let _ = sender.send(change.clone());
        }
    }

    /// Remove a channel (e.g. when a room is deleted).
    pub fn remove(&self, room_id: &Ulid) {
        self.channels.remove(room_id);
    }
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoomCategory;

    #[tokio::test]
    async fn subscribe_and_receive() {
        let hub = NotifyHub::new();
        let room_id = Ulid::new();
        let mut rx = hub.subscribe(room_id);

        let change = DiaryChange::RoomCreated {
            id: room_id,
            category: RoomCategory::MainHall,
            name: None,
        };
        hub.send(room_id, &change);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, change);
    }

    #[tokio::test]
    async fn send_without_subscribers_is_noop() {
        let hub = NotifyHub::new();
        let room_id = Ulid::new();
        // No subscriber: should not panic
        hub.send(room_id, &DiaryChange::RoomDeleted { id: room_id });
    }
}
