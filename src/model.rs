use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Price in pounds, the only money type.
pub type Money = f64;

/// Index of one hourly cell on the diary grid.
pub type Slot = usize;

/// Inclusive slot range `[start, end]` occupied by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpan {
    pub start: Slot,
    pub end: Slot,
}

impl SlotSpan {
    pub fn new(start: Slot, end: Slot) -> Self {
        debug_assert!(start <= end, "SlotSpan start must not exceed end");
        Self { start, end }
    }

    /// Inclusive on both ends: touching spans overlap.
    pub fn overlaps(&self, other: &SlotSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.start <= slot && slot <= self.end
    }

    pub fn slots(&self) -> std::ops::RangeInclusive<Slot> {
        self.start..=self.end
    }

    pub fn count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// The diary rendering grid: hourly slots from `base_hour`, inclusive.
/// The default covers 10:00 through midnight (15 slots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrid {
    pub base_hour: u32,
    pub total_slots: usize,
}

impl SlotGrid {
    pub fn new(base_hour: u32, total_slots: usize) -> Self {
        debug_assert!(total_slots > 0, "grid needs at least one slot");
        debug_assert!(
            total_slots <= crate::limits::MAX_TOTAL_SLOTS,
            "grid wider than MAX_TOTAL_SLOTS"
        );
        Self { base_hour, total_slots }
    }

    /// Slot containing the given wall-clock time, or `None` off the grid.
    pub fn slot_of(&self, t: NaiveTime) -> Option<Slot> {
        let h = t.hour();
        if h < self.base_hour {
            return None;
        }
        let slot = (h - self.base_hour) as usize;
        (slot < self.total_slots).then_some(slot)
    }

    /// Slot span for an event running `starts_at..ends_at`.
    ///
    /// An event ending exactly on the hour does not occupy the slot it ends
    /// in; a midnight end means "end of diary". Returns `None` when either
    /// time falls off the grid.
    pub fn span_of(&self, starts_at: NaiveTime, ends_at: NaiveTime) -> Option<SlotSpan> {
        let start = self.slot_of(starts_at)?;
        let end = if ends_at == NaiveTime::MIN {
            self.total_slots - 1
        } else {
            let h = ends_at.hour();
            if h < self.base_hour {
                return None;
            }
            let on_the_hour = ends_at.minute() == 0 && ends_at.second() == 0;
            let slot = (h - self.base_hour) as usize;
            let slot = if on_the_hour { slot.saturating_sub(1) } else { slot };
            slot.min(self.total_slots - 1)
        };
        (start <= end).then(|| SlotSpan::new(start, end))
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self::new(10, 15)
    }
}

/// One diary entry to be laid out: a single booking occurrence on one day.
///
/// Wall-clock times are carried for sort order and display only; slot math
/// always goes through [`SlotGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEvent {
    pub id: Ulid,
    pub span: SlotSpan,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub label: Option<String>,
}

/// Every bookable space in the hall. Pricing dispatches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomCategory {
    MainHall,
    SmallHall,
    RehearsalSpace,
    /// Whole-venue hire.
    Venue,
    GreenRoom,
    Boardroom,
    Den,
    Parlor,
    GlobeRoom,
    Chamber,
}

impl RoomCategory {
    /// Parse a storage-row category name. Unknown names fall back to the
    /// Main Hall calculation rather than failing the whole quote.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Main_Hall" | "Main Hall" => Self::MainHall,
            "Small_Hall" | "Small Hall" => Self::SmallHall,
            "Rehearsal_Space" | "Rehearsal Space" => Self::RehearsalSpace,
            "Venue" => Self::Venue,
            "Green_Room" | "Green Room" => Self::GreenRoom,
            "Boardroom" => Self::Boardroom,
            "Den" | "Dickens Den" => Self::Den,
            "Parlor" | "Parlour" => Self::Parlor,
            "Globe_Room" | "Globe Room" => Self::GlobeRoom,
            "Chamber" => Self::Chamber,
            other => {
                tracing::debug!(name = other, "unknown room category, pricing as Main Hall");
                Self::MainHall
            }
        }
    }

    /// True for the six smaller rooms priced off a 4-tuple rate card.
    pub fn is_small_room(&self) -> bool {
        matches!(
            self,
            Self::GreenRoom
                | Self::Boardroom
                | Self::Den
                | Self::Parlor
                | Self::GlobeRoom
                | Self::Chamber
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MainHall => "Main Hall",
            Self::SmallHall => "Small Hall",
            Self::RehearsalSpace => "Rehearsal Space",
            Self::Venue => "Venue",
            Self::GreenRoom => "Green Room",
            Self::Boardroom => "Boardroom",
            Self::Den => "Dickens Den",
            Self::Parlor => "Parlor",
            Self::GlobeRoom => "Globe Room",
            Self::Chamber => "Chamber",
        }
    }
}

impl std::fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pricing mode for the hall-like spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateTier {
    Hourly,
    Evening,
    Daily,
    Weekly,
}

impl std::fmt::Display for RateTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Hourly => "hourly",
            Self::Evening => "evening",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        };
        f.write_str(s)
    }
}

/// Coarse booking-length classification used by the small-room rate cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    Hour,
    HalfDay,
    FullDay,
    Week,
}

impl DurationBucket {
    /// `Week` is never derived from hours; only a seven-day booking
    /// selects it.
    pub fn from_hours(hours: i64) -> Self {
        if hours <= 1 {
            Self::Hour
        } else if hours <= 4 {
            Self::HalfDay
        } else {
            Self::FullDay
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hour => "1 Hour",
            Self::HalfDay => "Morning/Afternoon",
            Self::FullDay => "All Day",
            Self::Week => "Week",
        }
    }
}

impl std::fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the pricing engine needs to quote one booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub category: RoomCategory,
    pub date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    /// Calendar days covered; 1 for same-day bookings, 7 triggers weekly rates.
    pub total_days: u32,
}

impl PricingRequest {
    pub fn new(
        category: RoomCategory,
        date: NaiveDate,
        starts_at: NaiveTime,
        ends_at: NaiveTime,
        total_days: u32,
    ) -> Result<Self, crate::engine::EngineError> {
        use crate::engine::EngineError;
        if total_days == 0 {
            return Err(EngineError::InvalidRequest("booking must cover at least one day"));
        }
        if total_days > crate::limits::MAX_TOTAL_DAYS {
            return Err(EngineError::LimitExceeded("booking spans too many days"));
        }
        if ends_at != NaiveTime::MIN && ends_at < starts_at {
            return Err(EngineError::TimeOrder { starts_at, ends_at });
        }
        Ok(Self { category, date, starts_at, ends_at, total_days })
    }

    /// Build a request from the raw strings a booking form submits.
    /// Dates are `dd/mm/yyyy`, times `HH:MM`.
    pub fn from_strings(
        category: &str,
        date: &str,
        starts_at: &str,
        ends_at: &str,
        total_days: u32,
    ) -> Result<Self, crate::engine::EngineError> {
        use crate::engine::EngineError;
        let parsed_date = NaiveDate::parse_from_str(date, "%d/%m/%Y")
            .map_err(|_| EngineError::InvalidDate(date.to_string()))?;
        let parsed_start = NaiveTime::parse_from_str(starts_at, "%H:%M")
            .map_err(|_| EngineError::InvalidTime(starts_at.to_string()))?;
        let parsed_end = NaiveTime::parse_from_str(ends_at, "%H:%M")
            .map_err(|_| EngineError::InvalidTime(ends_at.to_string()))?;
        Self::new(
            RoomCategory::from_name(category),
            parsed_date,
            parsed_start,
            parsed_end,
            total_days,
        )
    }

    /// Whole hours in the booked span, floored. Midnight end counts as 24:00.
    pub fn hours(&self) -> i64 {
        let start = (self.starts_at.hour() * 60 + self.starts_at.minute()) as i64;
        let end = if self.ends_at == NaiveTime::MIN {
            24 * 60
        } else {
            (self.ends_at.hour() * 60 + self.ends_at.minute()) as i64
        };
        (end - start) / 60
    }
}

// ── Working-set shapes ───────────────────────────────────────────

/// A confirmed booking held in a room's working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomBooking {
    pub id: Ulid,
    pub date: NaiveDate,
    pub span: SlotSpan,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RoomState {
    pub id: Ulid,
    pub category: RoomCategory,
    pub name: Option<String>,
    /// All bookings, sorted by `(date, span.start)`.
    pub bookings: Vec<RoomBooking>,
}

impl RoomState {
    pub fn new(id: Ulid, category: RoomCategory, name: Option<String>) -> Self {
        Self { id, category, name, bookings: Vec::new() }
    }

    /// Insert a booking maintaining sort order by `(date, span.start)`.
    pub fn insert_booking(&mut self, booking: RoomBooking) {
        let pos = self
            .bookings
            .binary_search_by_key(&(booking.date, booking.span.start), |b| {
                (b.date, b.span.start)
            })
            .unwrap_or_else(|e| e);
        self.bookings.insert(pos, booking);
    }

    pub fn remove_booking(&mut self, id: Ulid) -> Option<RoomBooking> {
        if let Some(pos) = self.bookings.iter().position(|b| b.id == id) {
            Some(self.bookings.remove(pos))
        } else {
            None
        }
    }

    /// Bookings on the given day. Binary search skips everything earlier.
    pub fn on_day(&self, date: NaiveDate) -> impl Iterator<Item = &RoomBooking> {
        let first = self.bookings.partition_point(|b| b.date < date);
        self.bookings[first..]
            .iter()
            .take_while(move |b| b.date == date)
    }
}

/// Change notifications broadcast to diary views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiaryChange {
    RoomCreated {
        id: Ulid,
        category: RoomCategory,
        name: Option<String>,
    },
    RoomDeleted {
        id: Ulid,
    },
    BookingConfirmed {
        id: Ulid,
        room_id: Ulid,
        date: NaiveDate,
        span: SlotSpan,
        label: Option<String>,
    },
    BookingCancelled {
        id: Ulid,
        room_id: Ulid,
    },
}

// ── Query result types ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub id: Ulid,
    pub category: RoomCategory,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingInfo {
    pub id: Ulid,
    pub room_id: Ulid,
    pub date: NaiveDate,
    pub span: SlotSpan,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub label: Option<String>,
}
