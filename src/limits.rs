//! Hard caps guarding the in-memory working set.

pub const MAX_ROOMS: usize = 256;
pub const MAX_BOOKINGS_PER_ROOM: usize = 10_000;
pub const MAX_NAME_LEN: usize = 256;
pub const MAX_LABEL_LEN: usize = 512;
/// Widest diary grid we will lay out (two days of hourly slots).
pub const MAX_TOTAL_SLOTS: usize = 48;
/// Longest multi-day booking a quote will price.
pub const MAX_TOTAL_DAYS: u32 = 365;
