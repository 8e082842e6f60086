use chrono::NaiveTime;
use ulid::Ulid;

use crate::model::{DurationBucket, RateTier, RoomCategory};

#[derive(Debug)]
pub enum EngineError {
    NotFound(Ulid),
    AlreadyExists(Ulid),
    Conflict(Ulid),
    OutsideGrid {
        starts_at: NaiveTime,
        ends_at: NaiveTime,
    },
    TimeOrder {
        starts_at: NaiveTime,
        ends_at: NaiveTime,
    },
    InvalidRequest(&'static str),
    InvalidDate(String),
    InvalidTime(String),
    RateUnavailable {
        category: RoomCategory,
        tier: RateTier,
    },
    BucketRateUnavailable {
        category: RoomCategory,
        bucket: DurationBucket,
    },
    LimitExceeded(&'static str),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotFound(id) => write!(f, "not found: {id}"),
            EngineError::AlreadyExists(id) => write!(f, "already exists: {id}"),
            EngineError::Conflict(id) => write!(f, "conflict with booking: {id}"),
            EngineError::OutsideGrid { starts_at, ends_at } => {
                write!(f, "booking {starts_at}-{ends_at} falls outside the diary grid")
            }
            EngineError::TimeOrder { starts_at, ends_at } => {
                write!(f, "booking ends at {ends_at} before it starts at {starts_at}")
            }
            EngineError::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            EngineError::InvalidDate(s) => write!(f, "unparsable date: {s}"),
            EngineError::InvalidTime(s) => write!(f, "unparsable time: {s}"),
            EngineError::RateUnavailable { category, tier } => {
                write!(f, "no {tier} rate available for {category}")
            }
            EngineError::BucketRateUnavailable { category, bucket } => {
                write!(f, "no \"{bucket}\" rate available for {category}")
            }
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
