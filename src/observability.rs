//! Metric names recorded through the `metrics` facade. The core installs
//! no exporter; the embedding application decides where these go.

/// Counter: bookings confirmed.
pub const BOOKINGS_TOTAL: &str = "encore_bookings_total";

/// Counter: bookings rejected for double-booking a room.
pub const BOOKING_CONFLICTS_TOTAL: &str = "encore_booking_conflicts_total";

/// Counter: bookings cancelled.
pub const CANCELLATIONS_TOTAL: &str = "encore_cancellations_total";

/// Counter: prices quoted.
pub const QUOTES_TOTAL: &str = "encore_quotes_total";

/// Counter: quotes that failed validation or rate lookup.
pub const QUOTE_FAILURES_TOTAL: &str = "encore_quote_failures_total";

/// Histogram: events per computed day layout.
pub const LAYOUT_EVENTS: &str = "encore_layout_events";

/// Histogram: columns (peak concurrency) per computed day layout.
pub const LAYOUT_COLUMNS: &str = "encore_layout_columns";
