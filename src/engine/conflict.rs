use chrono::NaiveDate;

use crate::model::{RoomState, SlotSpan};

use super::EngineError;

/// Reject a booking whose slot span overlaps an existing booking in the
/// same room on the same day. Bookings in other rooms may overlap freely;
/// the layout engine renders those side by side.
pub(crate) fn check_no_conflict(
    room: &RoomState,
    date: NaiveDate,
    span: &SlotSpan,
) -> Result<(), EngineError> {
    for booking in room.on_day(date) {
        if booking.span.overlaps(span) {
            return Err(EngineError::Conflict(booking.id));
        }
    }
    Ok(())
}
