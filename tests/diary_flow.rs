use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use ulid::Ulid;

use encore::engine::{Engine, compute_price};
use encore::model::{DiaryChange, PricingRequest, RoomCategory, SlotGrid};
use encore::notify::NotifyHub;
use encore::rates::RateCard;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, day).unwrap()
}

/// A full operations day: rooms created, bookings taken, the diary laid
/// out for rendering and a quote produced for the booking form.
#[tokio::test]
async fn booking_desk_day() {
    let notify = Arc::new(NotifyHub::new());
    let engine = Engine::new(SlotGrid::default(), notify);

    let hall = Ulid::new();
    let small = Ulid::new();
    let den = Ulid::new();
    engine
        .create_room(hall, RoomCategory::MainHall, Some("Main Hall".into()))
        .unwrap();
    engine
        .create_room(small, RoomCategory::SmallHall, Some("Small Hall".into()))
        .unwrap();
    engine
        .create_room(den, RoomCategory::Den, Some("Dickens Den".into()))
        .unwrap();

    engine
        .book(Ulid::new(), hall, d(5), t(10, 0), t(13, 0), Some("Orchestra call".into()))
        .await
        .unwrap();
    engine
        .book(Ulid::new(), small, d(5), t(11, 0), t(15, 0), Some("Choir workshop".into()))
        .await
        .unwrap();
    engine
        .book(Ulid::new(), den, d(5), t(12, 0), t(14, 0), None)
        .await
        .unwrap();
    engine
        .book(Ulid::new(), hall, d(5), t(19, 0), t(23, 0), Some("Evening show".into()))
        .await
        .unwrap();

    let day = engine.day_layout(d(5)).await;
    assert_eq!(day.events.len(), 4);
    assert_eq!(day.layout.max_concurrent, 3);

    // No two overlapping events share a column
    for a in &day.events {
        for b in &day.events {
            if a.id != b.id && a.span.overlaps(&b.span) {
                assert_ne!(day.layout.column_of(a.id), day.layout.column_of(b.id));
            }
        }
    }

    // Quote the afternoon Den let exactly as the booking form would
    let request =
        PricingRequest::from_strings("Dickens Den", "05/06/2026", "12:00", "14:00", 1).unwrap();
    let price = compute_price(&request, &RateCard::default()).unwrap();
    assert_eq!(price, 75.0);
}

#[tokio::test]
async fn change_feed_drives_view_refresh() {
    let notify = Arc::new(NotifyHub::new());
    let engine = Engine::new(SlotGrid::default(), notify.clone());

    let room = Ulid::new();
    engine
        .create_room(room, RoomCategory::GlobeRoom, Some("Globe Room".into()))
        .unwrap();
    let mut rx = notify.subscribe(room);

    let id = Ulid::new();
    engine
        .book(id, room, d(10), t(14, 0), t(16, 0), None)
        .await
        .unwrap();
    engine.cancel(id).await.unwrap();

    assert!(matches!(
        rx.recv().await.unwrap(),
        DiaryChange::BookingConfirmed { id: got, .. } if got == id
    ));
    assert!(matches!(
        rx.recv().await.unwrap(),
        DiaryChange::BookingCancelled { id: got, .. } if got == id
    ));
}

#[tokio::test]
async fn conflicted_booking_leaves_diary_untouched() {
    let engine = Engine::new(SlotGrid::default(), Arc::new(NotifyHub::new()));

    let room = Ulid::new();
    engine.create_room(room, RoomCategory::MainHall, None).unwrap();
    engine
        .book(Ulid::new(), room, d(1), t(10, 0), t(14, 0), None)
        .await
        .unwrap();

    let rejected = Ulid::new();
    assert!(
        engine
            .book(rejected, room, d(1), t(12, 0), t(15, 0), None)
            .await
            .is_err()
    );
    assert_eq!(engine.room_for_booking(&rejected), None);
    assert_eq!(engine.day_events(d(1)).await.len(), 1);
}
