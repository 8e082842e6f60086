//! In-memory diary and pricing core for venue operations software.
//!
//! Two pure engines, overlap layout ([`engine::compute_layout`]) and booking
//! pricing ([`engine::compute_price`]), plus the working set of rooms and
//! bookings that feeds them. Storage and presentation live in the embedding
//! application.

pub mod engine;
pub mod limits;
pub mod model;
pub mod notify;
pub mod observability;
pub mod rates;
