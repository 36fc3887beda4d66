use std::sync::Arc;

use chrono::NaiveDate;
use stay_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::{Location, Payment, Reservation, Room, StayWindow};
use crate::errors::{DomainError, ReservationError};
use crate::repositories::reservation::{MockReservationRepository, ReservationRepository};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn room() -> Room {
    Room::new(Uuid::new_v4(), "Jeju cabin", 100.0, 20.0, 10.0, Location::default())
}

fn booking(room: &Room, user_id: Uuid, check_in: NaiveDate, check_out: NaiveDate) -> Reservation {
    Reservation::new(room.clone(), user_id, check_in, check_out, 2, 0.0)
}

#[tokio::test]
async fn test_insert_if_available_rejects_overlap() {
    let repo = MockReservationRepository::new();
    let room = room();
    let first = repo
        .insert_if_available(booking(&room, Uuid::new_v4(), date(3, 10), date(3, 15)))
        .await
        .unwrap();

    let result = repo
        .insert_if_available(booking(&room, Uuid::new_v4(), date(3, 12), date(3, 20)))
        .await;

    match result {
        Err(DomainError::Reservation(ReservationError::ReservationConflict {
            room_id,
            conflicting_id,
        })) => {
            assert_eq!(room_id, room.id);
            assert_eq!(conflicting_id, first.id);
        }
        other => panic!("Expected reservation conflict, got {:?}", other),
    }
    assert_eq!(repo.count().await, 1);
}

#[tokio::test]
async fn test_insert_if_available_allows_adjacent_and_other_rooms() {
    let repo = MockReservationRepository::new();
    let room = room();
    let other_room = self::room();

    repo.insert_if_available(booking(&room, Uuid::new_v4(), date(3, 10), date(3, 15)))
        .await
        .unwrap();
    repo.insert_if_available(booking(&room, Uuid::new_v4(), date(3, 15), date(3, 20)))
        .await
        .unwrap();
    repo.insert_if_available(booking(&other_room, Uuid::new_v4(), date(3, 10), date(3, 15)))
        .await
        .unwrap();

    assert_eq!(repo.count().await, 3);
}

#[tokio::test]
async fn test_concurrent_overlapping_inserts_admit_one() {
    let repo = Arc::new(MockReservationRepository::new());
    let room = room();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = repo.clone();
        let candidate = booking(&room, Uuid::new_v4(), date(3, 10), date(3, 15));
        handles.push(tokio::spawn(async move {
            repo.insert_if_available(candidate).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(repo.count().await, 1);
}

#[tokio::test]
async fn test_find_by_date_range_is_inclusive_on_check_in() {
    let repo = MockReservationRepository::new();
    let room = room();
    let user = Uuid::new_v4();

    repo.save(booking(&room, user, date(2, 1), date(2, 3))).await.unwrap();
    repo.save(booking(&room, user, date(2, 29), date(3, 2))).await.unwrap();
    repo.save(booking(&room, user, date(3, 1), date(3, 2))).await.unwrap();

    let found = repo
        .find_by_date_range_and_room(room.id, date(2, 1), date(2, 29))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].check_in, date(2, 1));
    assert_eq!(found[1].check_in, date(2, 29));
}

#[tokio::test]
async fn test_find_by_host_with_payment_skips_pending() {
    let repo = MockReservationRepository::new();
    let room = room();
    let user = Uuid::new_v4();

    let mut paid = booking(&room, user, date(3, 1), date(3, 3));
    paid.attach_payment(Payment::new("rcpt-1", 250.0));
    repo.save(paid).await.unwrap();
    repo.save(booking(&room, user, date(4, 1), date(4, 3))).await.unwrap();

    let found = repo.find_by_host_with_payment(room.host_id).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].receipt_id(), Some("rcpt-1"));

    let by_receipt = repo.find_by_receipt_id("rcpt-1").await.unwrap();
    assert!(by_receipt.is_some());
    assert!(repo.find_by_receipt_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_room_from_and_paging() {
    let repo = MockReservationRepository::new();
    let room = room();
    let user = Uuid::new_v4();

    for day in [1, 5, 9, 13, 17] {
        repo.save(booking(&room, user, date(5, day), date(5, day + 2)))
            .await
            .unwrap();
    }

    let upcoming = repo.find_by_room_from(room.id, date(5, 11)).await.unwrap();
    assert_eq!(upcoming.len(), 3);
    assert_eq!(upcoming[0].check_in, date(5, 9));

    let page = repo
        .find_by_user_paged(user, Pagination::new(2, 2))
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].check_in, date(5, 9));
    assert!(page.has_next);
}

#[tokio::test]
async fn test_delete_twice_reports_missing() {
    let repo = MockReservationRepository::new();
    let saved = repo
        .save(booking(&room(), Uuid::new_v4(), date(6, 1), date(6, 2)))
        .await
        .unwrap();

    assert!(repo.delete_by_id(saved.id).await.unwrap());
    assert!(!repo.delete_by_id(saved.id).await.unwrap());
    assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_overlapping_includes_stays_starting_before_window() {
    let repo = MockReservationRepository::new();
    let room = room();
    let user = Uuid::new_v4();

    let spanning = repo
        .save(booking(&room, user, date(1, 28), date(3, 3)))
        .await
        .unwrap();
    repo.save(booking(&room, user, date(1, 20), date(2, 1)))
        .await
        .unwrap();
    let inside = repo
        .save(booking(&room, user, date(2, 10), date(2, 12)))
        .await
        .unwrap();
    repo.save(booking(&self::room(), user, date(2, 10), date(2, 12)))
        .await
        .unwrap();

    let february = StayWindow::new(date(2, 1), date(3, 1));
    let found = repo.find_overlapping(room.id, february).await.unwrap();

    let ids: Vec<Uuid> = found.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![spanning.id, inside.id]);
}
