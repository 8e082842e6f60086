use chrono::NaiveDate;
use tracing::debug;
use ulid::Ulid;

use crate::model::*;
use crate::observability;

use super::layout::{Layout, compute_layout};
use super::{Engine, EngineError, SharedRoomState};

/// One rendered diary day: the events queried for it plus their layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub events: Vec<DiaryEvent>,
    pub layout: Layout,
}

impl Engine {
    pub fn list_rooms(&self) -> Vec<RoomInfo> {
        self.rooms
            .iter()
            .map(|entry| {
                let room = entry.value().clone();
                let guard = room.try_read().expect("list_rooms: uncontended read");
                RoomInfo {
                    id: guard.id,
                    category: guard.category,
                    name: guard.name.clone(),
                }
            })
            .collect()
    }

    pub async fn bookings_for_room(
        &self,
        room_id: Ulid,
    ) -> Result<Vec<BookingInfo>, EngineError> {
        let room = match self.get_room(&room_id) {
            Some(room) => room,
            None => return Ok(vec![]),
        };
        let guard = room.read().await;
        Ok(guard
            .bookings
            .iter()
            .map(|b| BookingInfo {
                id: b.id,
                room_id,
                date: b.date,
                span: b.span,
                starts_at: b.starts_at,
                ends_at: b.ends_at,
                label: b.label.clone(),
            })
            .collect())
    }

    /// All events across rooms on one day, in a fixed order.
    ///
    /// Bookings without a label borrow their room's display name. DashMap
    /// iteration order is arbitrary, so events are sorted by
    /// `(starts_at, id)` to keep layout input, and therefore column
    /// assignment, reproducible between calls.
    pub async fn day_events(&self, date: NaiveDate) -> Vec<DiaryEvent> {
        let rooms: Vec<SharedRoomState> =
            self.rooms.iter().map(|e| e.value().clone()).collect();

        let mut events = Vec::new();
        for room in rooms {
            let guard = room.read().await;
            for b in guard.on_day(date) {
                events.push(DiaryEvent {
                    id: b.id,
                    span: b.span,
                    starts_at: b.starts_at,
                    ends_at: b.ends_at,
                    label: b.label.clone().or_else(|| guard.name.clone()),
                });
            }
        }
        events.sort_by_key(|e| (e.starts_at, e.id));
        events
    }

    /// One diary day, laid out for rendering.
    pub async fn day_layout(&self, date: NaiveDate) -> DayLayout {
        let events = self.day_events(date).await;
        let layout = compute_layout(&events, self.grid.total_slots);
        metrics::histogram!(observability::LAYOUT_EVENTS).record(events.len() as f64);
        metrics::histogram!(observability::LAYOUT_COLUMNS).record(layout.max_concurrent as f64);
        debug!(%date, events = events.len(), columns = layout.max_concurrent, "day layout");
        DayLayout { date, events, layout }
    }

    /// Seven consecutive day layouts starting at `start`.
    pub async fn week_layout(&self, start: NaiveDate) -> Vec<DayLayout> {
        let mut days = Vec::with_capacity(7);
        for offset in 0..7 {
            let date = start + chrono::Duration::days(offset);
            days.push(self.day_layout(date).await);
        }
        days
    }
}
