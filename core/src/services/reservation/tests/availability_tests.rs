//! Unit tests for date sanity and overlap detection

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::{Location, Reservation, Room};
use crate::errors::{DomainError, ReservationError};
use crate::services::reservation::{check_available_date, check_strange_date};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn existing(check_in: u32, check_out: u32) -> Vec<Reservation> {
    let room = Room::new(Uuid::new_v4(), "room", 100.0, 10.0, 5.0, Location::default());
    vec![Reservation::new(
        room,
        Uuid::new_v4(),
        date(check_in),
        date(check_out),
        1,
        0.0,
    )]
}

fn assert_conflict(result: Result<(), DomainError>, expected_id: Uuid) {
    match result {
        Err(DomainError::Reservation(ReservationError::ReservationConflict {
            conflicting_id,
            ..
        })) => assert_eq!(conflicting_id, expected_id),
        other => panic!("Expected reservation conflict, got {:?}", other),
    }
}

#[test]
fn test_check_in_inside_existing_conflicts() {
    let booked = existing(10, 15);
    assert_conflict(check_available_date(&booked, date(12), date(20)), booked[0].id);
}

#[test]
fn test_candidate_enclosing_existing_conflicts() {
    let booked = existing(10, 15);
    assert_conflict(check_available_date(&booked, date(8), date(18)), booked[0].id);
}

#[test]
fn test_check_out_inside_existing_conflicts() {
    let booked = existing(10, 15);
    assert_conflict(check_available_date(&booked, date(5), date(12)), booked[0].id);
}

#[test]
fn test_candidate_inside_existing_conflicts() {
    let booked = existing(10, 15);
    assert_conflict(check_available_date(&booked, date(11), date(13)), booked[0].id);
}

#[test]
fn test_identical_range_conflicts() {
    let booked = existing(10, 15);
    assert_conflict(check_available_date(&booked, date(10), date(15)), booked[0].id);
}

#[test]
fn test_same_check_in_different_check_out_conflicts() {
    let booked = existing(10, 15);
    assert_conflict(check_available_date(&booked, date(10), date(11)), booked[0].id);
    assert_conflict(check_available_date(&booked, date(10), date(25)), booked[0].id);
}

#[test]
fn test_adjacent_ranges_are_available() {
    let booked = existing(10, 15);
    assert!(check_available_date(&booked, date(15), date(20)).is_ok());
    assert!(check_available_date(&booked, date(5), date(10)).is_ok());
}

#[test]
fn test_no_existing_reservations_is_available() {
    assert!(check_available_date(&[], date(1), date(31)).is_ok());
}

#[test]
fn test_strange_date_rules() {
    let today = date(10);

    assert!(check_strange_date(today, date(10), date(11)).is_ok());
    assert!(check_strange_date(today, date(20), date(25)).is_ok());

    for (check_in, check_out) in [(date(9), date(12)), (date(12), date(12)), (date(14), date(12))] {
        match check_strange_date(today, check_in, check_out) {
            Err(DomainError::Reservation(ReservationError::InvalidDateRange { .. })) => {}
            other => panic!("Expected invalid date range, got {:?}", other),
        }
    }
}
