use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, RateLookup};
use crate::model::{DurationBucket, Money, RateTier, RoomCategory};

/// Tier rates for one hall-like space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRates {
    pub hourly: Money,
    pub evening: Money,
    pub daily: Money,
    pub weekly: Money,
}

impl TierRates {
    pub fn get(&self, tier: RateTier) -> Money {
        match tier {
            RateTier::Hourly => self.hourly,
            RateTier::Evening => self.evening,
            RateTier::Daily => self.daily,
            RateTier::Weekly => self.weekly,
        }
    }
}

/// The 4-tuple rate card for one of the six smaller rooms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomRates {
    pub hour: Money,
    pub morning_afternoon: Money,
    pub all_day: Money,
    pub week: Money,
}

impl RoomRates {
    pub fn get(&self, bucket: DurationBucket) -> Money {
        match bucket {
            DurationBucket::Hour => self.hour,
            DurationBucket::HalfDay => self.morning_afternoon,
            DurationBucket::FullDay => self.all_day,
            DurationBucket::Week => self.week,
        }
    }
}

/// Injectable rate configuration.
///
/// The default carries the venue's standing price list; deployments that
/// price halls from live storage rates implement [`RateLookup`] over their
/// own source instead. Rates here do not vary by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    pub halls: HashMap<RoomCategory, TierRates>,
    pub rooms: HashMap<RoomCategory, RoomRates>,
}

impl RateCard {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for RateCard {
    fn default() -> Self {
        let halls = HashMap::from([
            (
                RoomCategory::MainHall,
                TierRates { hourly: 50.0, evening: 350.0, daily: 500.0, weekly: 2500.0 },
            ),
            (
                RoomCategory::SmallHall,
                TierRates { hourly: 30.0, evening: 200.0, daily: 300.0, weekly: 1500.0 },
            ),
            (
                RoomCategory::RehearsalSpace,
                TierRates { hourly: 25.0, evening: 120.0, daily: 180.0, weekly: 900.0 },
            ),
            (
                RoomCategory::Venue,
                TierRates { hourly: 100.0, evening: 1000.0, daily: 1500.0, weekly: 7000.0 },
            ),
        ]);
        let rooms = HashMap::from([
            (
                RoomCategory::GreenRoom,
                RoomRates { hour: 35.0, morning_afternoon: 70.0, all_day: 120.0, week: 450.0 },
            ),
            (
                RoomCategory::Boardroom,
                RoomRates { hour: 50.0, morning_afternoon: 90.0, all_day: 160.0, week: 600.0 },
            ),
            (
                RoomCategory::Den,
                RoomRates { hour: 40.0, morning_afternoon: 75.0, all_day: 130.0, week: 500.0 },
            ),
            (
                RoomCategory::Parlor,
                RoomRates { hour: 30.0, morning_afternoon: 60.0, all_day: 110.0, week: 400.0 },
            ),
            (
                RoomCategory::GlobeRoom,
                RoomRates { hour: 45.0, morning_afternoon: 85.0, all_day: 150.0, week: 550.0 },
            ),
            (
                RoomCategory::Chamber,
                RoomRates { hour: 55.0, morning_afternoon: 100.0, all_day: 170.0, week: 650.0 },
            ),
        ]);
        Self { halls, rooms }
    }
}

impl RateLookup for RateCard {
    fn tier_rate(
        &self,
        category: RoomCategory,
        _date: NaiveDate,
        tier: RateTier,
    ) -> Result<Money, EngineError> {
        self.halls
            .get(&category)
            .map(|r| r.get(tier))
            .ok_or(EngineError::RateUnavailable { category, tier })
    }

    fn bucket_rate(
        &self,
        category: RoomCategory,
        bucket: DurationBucket,
    ) -> Result<Money, EngineError> {
        self.rooms
            .get(&category)
            .map(|r| r.get(bucket))
            .ok_or(EngineError::BucketRateUnavailable { category, bucket })
    }
}
