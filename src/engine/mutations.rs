use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tokio::sync::RwLock;
use tracing::{debug, info};
use ulid::Ulid;

use crate::limits::*;
use crate::model::*;
use crate::observability;

use super::conflict::check_no_conflict;
use super::{Engine, EngineError};

impl Engine {
    pub fn create_room(
        &self,
        id: Ulid,
        category: RoomCategory,
        name: Option<String>,
    ) -> Result<(), EngineError> {
        if self.rooms.len() >= MAX_ROOMS {
            return Err(EngineError::LimitExceeded("too many rooms"));
        }
        if let Some(ref n) = name
            && n.len() > MAX_NAME_LEN {
                return Err(EngineError::LimitExceeded("room name too long"));
            }
        if self.rooms.contains_key(&id) {
            return Err(EngineError::AlreadyExists(id));
        }

        let room = RoomState::new(id, category, name.clone());
        self.rooms.insert(id, Arc::new(RwLock::new(room)));
        self.notify.send(id, &DiaryChange::RoomCreated { id, category, name });
        info!(room = %id, %category, "room created");
        Ok(())
    }

    pub async fn delete_room(&self, id: Ulid) -> Result<(), EngineError> {
        let room = self.get_room(&id).ok_or(EngineError::NotFound(id))?;
        let guard = room.read().await;
        for booking in &guard.bookings {
            self.booking_to_room.remove(&booking.id);
        }
        drop(guard);

        self.rooms.remove(&id);
        self.notify.send(id, &DiaryChange::RoomDeleted { id });
        self.notify.remove(&id);
        info!(room = %id, "room deleted");
        Ok(())
    }

    /// Confirm a booking, assigning its slot span on the diary grid.
    ///
    /// Fails fast on times off the grid; within one room, overlapping
    /// bookings on the same day are conflicts.
    pub async fn book(
        &self,
        id: Ulid,
        room_id: Ulid,
        date: NaiveDate,
        starts_at: NaiveTime,
        ends_at: NaiveTime,
        label: Option<String>,
    ) -> Result<SlotSpan, EngineError> {
        if let Some(ref l) = label
            && l.len() > MAX_LABEL_LEN {
                return Err(EngineError::LimitExceeded("label too long"));
            }
        if ends_at != NaiveTime::MIN && ends_at < starts_at {
            return Err(EngineError::TimeOrder { starts_at, ends_at });
        }
        let span = self
            .grid
            .span_of(starts_at, ends_at)
            .ok_or(EngineError::OutsideGrid { starts_at, ends_at })?;
        if self.booking_to_room.contains_key(&id) {
            return Err(EngineError::AlreadyExists(id));
        }

        let room = self.get_room(&room_id).ok_or(EngineError::NotFound(room_id))?;
        let mut guard = room.write().await;
        if guard.bookings.len() >= MAX_BOOKINGS_PER_ROOM {
            return Err(EngineError::LimitExceeded("too many bookings on room"));
        }

        if let Err(e) = check_no_conflict(&guard, date, &span) {
            metrics::counter!(observability::BOOKING_CONFLICTS_TOTAL).increment(1);
            return Err(e);
        }

        guard.insert_booking(RoomBooking {
            id,
            date,
            span,
            starts_at,
            ends_at,
            label: label.clone(),
        });
        self.booking_to_room.insert(id, room_id);
        self.notify
            .send(room_id, &DiaryChange::BookingConfirmed { id, room_id, date, span, label });
        metrics::counter!(observability::BOOKINGS_TOTAL).increment(1);
        debug!(booking = %id, room = %room_id, %date, "booking confirmed");
        Ok(span)
    }

    pub async fn cancel(&self, id: Ulid) -> Result<Ulid, EngineError> {
        let (room_id, mut guard) = self.resolve_booking_write(&id).await?;
        guard.remove_booking(id).ok_or(EngineError::NotFound(id))?;
        drop(guard);

        self.booking_to_room.remove(&id);
        self.notify
            .send(room_id, &DiaryChange::BookingCancelled { id, room_id });
        metrics::counter!(observability::CANCELLATIONS_TOTAL).increment(1);
        debug!(booking = %id, room = %room_id, "booking cancelled");
        Ok(room_id)
    }
}
