use chrono::{NaiveDate, Timelike};
use tracing::debug;

use crate::model::{DurationBucket, Money, PricingRequest, RateTier, RoomCategory};

use super::EngineError;

// ── Pricing Algorithm ────────────────────────────────────────────

/// Bookings starting at or after this hour price at the evening tier.
pub const EVENING_START_HOUR: u32 = 17;
/// Hourly-tier bookings are billed for at least this many hours.
pub const MIN_HOURLY_HOURS: i64 = 3;
/// A seven-day booking is the only span billed at the weekly tier.
pub const WEEK_DAYS: u32 = 7;

/// Capability the storage/config layer implements. Hall-like spaces carry
/// per-date tier rates; the six smaller rooms carry a fixed 4-tuple card.
pub trait RateLookup {
    fn tier_rate(
        &self,
        category: RoomCategory,
        date: NaiveDate,
        tier: RateTier,
    ) -> Result<Money, EngineError>;

    fn bucket_rate(
        &self,
        category: RoomCategory,
        bucket: DurationBucket,
    ) -> Result<Money, EngineError>;
}

/// Compute the total price for one booking request.
///
/// Rate-lookup failures propagate; they are never papered over with a
/// zero price. The 3-hour minimum applies to hourly-tier calculations
/// only, never to flat or daily/weekly tiers.
pub fn compute_price(
    request: &PricingRequest,
    rates: &dyn RateLookup,
) -> Result<Money, EngineError> {
    let result = price_request(request, rates);
    match &result {
        Ok(price) => {
            metrics::counter!(crate::observability::QUOTES_TOTAL).increment(1);
            debug!(
                category = %request.category,
                days = request.total_days,
                hours = request.hours(),
                price,
                "priced booking"
            );
        }
        Err(e) => {
            metrics::counter!(crate::observability::QUOTE_FAILURES_TOTAL).increment(1);
            debug!(category = %request.category, error = %e, "quote failed");
        }
    }
    result
}

fn price_request(request: &PricingRequest, rates: &dyn RateLookup) -> Result<Money, EngineError> {
    if request.total_days == 0 {
        return Err(EngineError::InvalidRequest("booking must cover at least one day"));
    }
    let hours = request.hours();
    if hours < 0 {
        return Err(EngineError::TimeOrder {
            starts_at: request.starts_at,
            ends_at: request.ends_at,
        });
    }

    let category = request.category;
    let date = request.date;
    let days = request.total_days;
    let billable_hours = hours.max(MIN_HOURLY_HOURS);
    let evening = request.starts_at.hour() >= EVENING_START_HOUR;

    use RoomCategory::*;
    let price = match category {
        MainHall | SmallHall => {
            if days == 1 {
                if evening {
                    rates.tier_rate(category, date, RateTier::Evening)?
                } else {
                    rates.tier_rate(category, date, RateTier::Hourly)? * billable_hours as Money
                }
            } else {
                rates.tier_rate(category, date, RateTier::Daily)? * days as Money
            }
        }
        RehearsalSpace => {
            if days == 1 {
                rates.tier_rate(category, date, RateTier::Hourly)? * billable_hours as Money
            } else if days == WEEK_DAYS {
                rates.tier_rate(category, date, RateTier::Weekly)?
            } else {
                rates.tier_rate(category, date, RateTier::Daily)? * days as Money
            }
        }
        Venue => {
            if days == 1 {
                if evening {
                    rates.tier_rate(category, date, RateTier::Evening)?
                } else {
                    rates.tier_rate(category, date, RateTier::Daily)?
                }
            } else {
                rates.tier_rate(category, date, RateTier::Daily)? * days as Money
            }
        }
        GreenRoom | Boardroom | Den | Parlor | GlobeRoom | Chamber => {
            if days == 1 {
                rates.bucket_rate(category, DurationBucket::from_hours(hours))?
            } else if days == WEEK_DAYS {
                rates.bucket_rate(category, DurationBucket::Week)?
            } else {
                rates.bucket_rate(category, DurationBucket::FullDay)? * days as Money
            }
        }
    };

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateCard;
    use chrono::{NaiveDate, NaiveTime};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn request(category: RoomCategory, start: NaiveTime, end: NaiveTime, days: u32) -> PricingRequest {
        PricingRequest::new(category, d(14), start, end, days).unwrap()
    }

    /// Fixed card matching the quoted production table, so the concrete
    /// scenarios below check exact figures.
    fn card() -> RateCard {
        RateCard::default()
    }

    #[test]
    fn main_hall_daytime_hourly_with_floor() {
        // 2 hours at 50/h bills as 3 hours
        let req = request(RoomCategory::MainHall, t(14, 0), t(16, 0), 1);
        let price = compute_price(&req, &card()).unwrap();
        assert_eq!(price, 150.0);
    }

    #[test]
    fn three_hour_floor_equalises_short_bookings() {
        for category in [
            RoomCategory::MainHall,
            RoomCategory::SmallHall,
            RoomCategory::RehearsalSpace,
        ] {
            let one_hour = request(category, t(10, 0), t(11, 0), 1);
            let three_hours = request(category, t(10, 0), t(13, 0), 1);
            assert_eq!(
                compute_price(&one_hour, &card()).unwrap(),
                compute_price(&three_hours, &card()).unwrap(),
                "{category}"
            );
        }
    }

    #[test]
    fn main_hall_evening_flat_regardless_of_duration() {
        let short = request(RoomCategory::MainHall, t(18, 0), t(19, 0), 1);
        let long = request(RoomCategory::MainHall, t(18, 0), t(23, 30), 1);
        let flat = compute_price(&short, &card()).unwrap();
        assert_eq!(flat, compute_price(&long, &card()).unwrap());
        // Boundary: a 17:00 start is already evening
        let at_five = request(RoomCategory::MainHall, t(17, 0), t(20, 0), 1);
        assert_eq!(flat, compute_price(&at_five, &card()).unwrap());
    }

    #[test]
    fn main_hall_multi_day_uses_daily_rate() {
        let req = request(RoomCategory::MainHall, t(10, 0), t(18, 0), 3);
        let daily = card()
            .tier_rate(RoomCategory::MainHall, d(14), RateTier::Daily)
            .unwrap();
        assert_eq!(compute_price(&req, &card()).unwrap(), daily * 3.0);
    }

    #[test]
    fn rehearsal_space_week_is_flat() {
        let req = request(RoomCategory::RehearsalSpace, t(10, 0), t(18, 0), 7);
        let weekly = card()
            .tier_rate(RoomCategory::RehearsalSpace, d(14), RateTier::Weekly)
            .unwrap();
        assert_eq!(compute_price(&req, &card()).unwrap(), weekly);
    }

    #[test]
    fn rehearsal_space_multi_day_multiplies_daily() {
        let req = request(RoomCategory::RehearsalSpace, t(10, 0), t(18, 0), 4);
        let daily = card()
            .tier_rate(RoomCategory::RehearsalSpace, d(14), RateTier::Daily)
            .unwrap();
        assert_eq!(compute_price(&req, &card()).unwrap(), daily * 4.0);
    }

    #[test]
    fn venue_day_and_evening_flats() {
        let daytime = request(RoomCategory::Venue, t(10, 0), t(16, 0), 1);
        let evening = request(RoomCategory::Venue, t(19, 0), t(23, 0), 1);
        let daily = card()
            .tier_rate(RoomCategory::Venue, d(14), RateTier::Daily)
            .unwrap();
        let evening_rate = card()
            .tier_rate(RoomCategory::Venue, d(14), RateTier::Evening)
            .unwrap();
        assert_eq!(compute_price(&daytime, &card()).unwrap(), daily);
        assert_eq!(compute_price(&evening, &card()).unwrap(), evening_rate);
    }

    #[test]
    fn den_three_hours_is_morning_afternoon_rate() {
        let req = request(RoomCategory::Den, t(13, 0), t(16, 0), 1);
        assert_eq!(compute_price(&req, &card()).unwrap(), 75.0);
    }

    #[test]
    fn den_week_is_flat_not_seven_all_days() {
        let req = request(RoomCategory::Den, t(10, 0), t(18, 0), 7);
        assert_eq!(compute_price(&req, &card()).unwrap(), 500.0);
    }

    #[test]
    fn small_room_bucket_edges() {
        let hour = request(RoomCategory::Den, t(10, 0), t(11, 0), 1);
        assert_eq!(compute_price(&hour, &card()).unwrap(), 40.0);
        let four_hours = request(RoomCategory::Den, t(10, 0), t(14, 0), 1);
        assert_eq!(compute_price(&four_hours, &card()).unwrap(), 75.0);
        let five_hours = request(RoomCategory::Den, t(10, 0), t(15, 0), 1);
        assert_eq!(compute_price(&five_hours, &card()).unwrap(), 130.0);
    }

    #[test]
    fn small_room_two_days_multiplies_all_day_rate() {
        let req = request(RoomCategory::Den, t(10, 0), t(18, 0), 2);
        assert_eq!(compute_price(&req, &card()).unwrap(), 260.0);
    }

    #[test]
    fn unknown_category_name_prices_as_main_hall() {
        let req = PricingRequest::from_strings("Mystery Wing", "14/03/2026", "14:00", "16:00", 1)
            .unwrap();
        let fallback = compute_price(&req, &card()).unwrap();
        let main_hall = request(RoomCategory::MainHall, t(14, 0), t(16, 0), 1);
        assert_eq!(fallback, compute_price(&main_hall, &card()).unwrap());
    }

    #[test]
    fn lookup_failure_propagates_not_zero() {
        struct NoRates;
        impl RateLookup for NoRates {
            fn tier_rate(
                &self,
                category: RoomCategory,
                _date: NaiveDate,
                tier: RateTier,
            ) -> Result<Money, EngineError> {
                Err(EngineError::RateUnavailable { category, tier })
            }
            fn bucket_rate(
                &self,
                category: RoomCategory,
                bucket: DurationBucket,
            ) -> Result<Money, EngineError> {
                Err(EngineError::BucketRateUnavailable { category, bucket })
            }
        }

        let hall = request(RoomCategory::MainHall, t(14, 0), t(16, 0), 1);
        assert!(matches!(
            compute_price(&hall, &NoRates),
            Err(EngineError::RateUnavailable { .. })
        ));
        let room = request(RoomCategory::Parlor, t(14, 0), t(16, 0), 1);
        assert!(matches!(
            compute_price(&room, &NoRates),
            Err(EngineError::BucketRateUnavailable { .. })
        ));
    }

    #[test]
    fn zero_days_rejected_at_compute_time() {
        // Struct literal bypasses PricingRequest::new validation
        let req = PricingRequest {
            category: RoomCategory::MainHall,
            date: d(14),
            starts_at: t(10, 0),
            ends_at: t(12, 0),
            total_days: 0,
        };
        assert!(matches!(
            compute_price(&req, &card()),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn inverted_times_rejected_at_compute_time() {
        let req = PricingRequest {
            category: RoomCategory::MainHall,
            date: d(14),
            starts_at: t(14, 0),
            ends_at: t(12, 0),
            total_days: 1,
        };
        assert!(matches!(
            compute_price(&req, &card()),
            Err(EngineError::TimeOrder { .. })
        ));
    }
}
