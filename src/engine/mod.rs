mod conflict;
mod error;
mod layout;
mod mutations;
mod pricing;
mod queries;

pub use error::EngineError;
pub use layout::{Layout, Placement, compute_layout};
pub use pricing::{
    EVENING_START_HOUR, MIN_HOURLY_HOURS, RateLookup, WEEK_DAYS, compute_price,
};
pub use queries::DayLayout;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::model::*;
use crate::notify::NotifyHub;

pub type SharedRoomState = Arc<RwLock<RoomState>>;

/// In-memory working set of the venue's rooms and their bookings.
///
/// Hydrated from storage by the embedding application; the engine itself
/// persists nothing. Diary queries assemble fresh [`DiaryEvent`] lists and
/// feed the pure layout function; mutations guard against double-booking
/// and broadcast [`DiaryChange`]s for open diary views.
pub struct Engine {
    pub rooms: DashMap<Ulid, SharedRoomState>,
    pub notify: Arc<NotifyHub>,
    /// Grid every diary view renders against.
    pub grid: SlotGrid,
    /// Reverse lookup: booking id → room id.
    pub(super) booking_to_room: DashMap<Ulid, Ulid>,
}

impl Engine {
    pub fn new(grid: SlotGrid, notify: Arc<NotifyHub>) -> Self {
        Self {
            rooms: DashMap::new(),
            notify,
            grid,
            booking_to_room: DashMap::new(),
        }
    }

    pub fn get_room(&self, id: &Ulid) -> Option<SharedRoomState> {
        self.rooms.get(id).map(|e| e.value().clone())
    }

    pub fn room_for_booking(&self, booking_id: &Ulid) -> Option<Ulid> {
        self.booking_to_room.get(booking_id).map(|e| *e.value())
    }

    /// Lookup booking → room, get room, acquire write lock.
    pub(super) async fn resolve_booking_write(
        &self,
        booking_id: &Ulid,
    ) -> Result<(Ulid, tokio::sync::OwnedRwLockWriteGuard<RoomState>), EngineError> {
        let room_id = self
            .room_for_booking(booking_id)
            .ok_or(EngineError::NotFound(*booking_id))?;
        let room = self
            .get_room(&room_id)
            .ok_or(EngineError::NotFound(room_id))?;
        let guard = room.write_owned().await;
        Ok((room_id, guard))
    }
}
