//! Reservation entity and the stay window it occupies.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payment::Payment;
use super::room::Room;

/// Half-open date range `[check_in, check_out)` occupied by a stay.
///
/// The check-out day itself is free, so a stay ending on the 15th and another
/// starting on the 15th do not conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayWindow {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayWindow {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Whether two windows share at least one night
    pub fn overlaps(&self, other: &StayWindow) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Whether the night starting on `date` falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    /// Number of nights in the window (0 for degenerate windows)
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days().max(0)
    }
}

/// How a reservation is presented in a guest's trip list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayStatus {
    /// Upcoming or ongoing stay
    Reserved,
    /// Check-out date has passed
    Completed,
}

/// A guest's booking of a room for a stay window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier for the reservation
    pub id: Uuid,

    /// Snapshot of the booked room
    pub room: Room,

    /// Guest who made the booking
    pub user_id: Uuid,

    pub check_in: NaiveDate,
    pub check_out: NaiveDate,

    /// Number of guests
    pub guest_num: u32,

    /// Total cost quoted to the guest at booking time
    pub total_cost: f64,

    /// Verified payment; `None` while the reservation is pending
    pub payment: Option<Payment>,

    /// Review left by the guest, if any
    pub comment_id: Option<Uuid>,

    pub comment_existed: bool,

    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a pending reservation
    pub fn new(
        room: Room,
        user_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guest_num: u32,
        total_cost: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            room,
            user_id,
            check_in,
            check_out,
            guest_num,
            total_cost,
            payment: None,
            comment_id: None,
            comment_existed: false,
            created_at: Utc::now(),
        }
    }

    pub fn window(&self) -> StayWindow {
        StayWindow::new(self.check_in, self.check_out)
    }

    pub fn nights(&self) -> i64 {
        self.window().nights()
    }

    pub fn room_id(&self) -> Uuid {
        self.room.id
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn is_paid(&self) -> bool {
        self.payment.is_some()
    }

    /// Receipt id of the attached payment
    pub fn receipt_id(&self) -> Option<&str> {
        self.payment.as_ref().map(|p| p.receipt_id.as_str())
    }

    /// Amount actually paid, zero while pending
    pub fn paid_amount(&self) -> f64 {
        self.payment.as_ref().map(|p| p.price).unwrap_or(0.0)
    }

    pub fn attach_payment(&mut self, payment: Payment) {
        self.payment = Some(payment);
    }

    /// Removes and returns the attached payment, returning the reservation to pending
    pub fn detach_payment(&mut self) -> Option<Payment> {
        self.payment.take()
    }

    pub fn attach_comment(&mut self, comment_id: Uuid) {
        self.comment_id = Some(comment_id);
        self.comment_existed = true;
    }

    /// Completed once the check-out date is strictly in the past
    pub fn status(&self, today: NaiveDate) -> StayStatus {
        if self.check_out < today {
            StayStatus::Completed
        } else {
            StayStatus::Reserved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::room::Location;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(from: u32, to: u32) -> StayWindow {
        StayWindow::new(date(2024, 3, from), date(2024, 3, to))
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = window(10, 15);
        let b = window(12, 20);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_adjacent_windows_do_not_overlap() {
        assert!(!window(10, 15).overlaps(&window(15, 20)));
        assert!(!window(15, 20).overlaps(&window(10, 15)));
    }

    #[test]
    fn test_contains_excludes_check_out_day() {
        let w = window(10, 15);
        assert!(w.contains(date(2024, 3, 10)));
        assert!(w.contains(date(2024, 3, 14)));
        assert!(!w.contains(date(2024, 3, 15)));
        assert_eq!(w.nights(), 5);
    }

    #[test]
    fn test_status_and_payment_lifecycle() {
        let room = Room::new(Uuid::new_v4(), "room", 100.0, 10.0, 5.0, Location::default());
        let mut reservation =
            Reservation::new(room, Uuid::new_v4(), date(2024, 3, 10), date(2024, 3, 15), 2, 0.0);

        assert_eq!(reservation.status(date(2024, 3, 15)), StayStatus::Reserved);
        assert_eq!(reservation.status(date(2024, 3, 16)), StayStatus::Completed);

        assert!(!reservation.is_paid());
        reservation.attach_payment(Payment::new("rcpt", 560.0));
        assert_eq!(reservation.receipt_id(), Some("rcpt"));
        assert_eq!(reservation.paid_amount(), 560.0);

        let detached = reservation.detach_payment().unwrap();
        assert_eq!(detached.receipt_id, "rcpt");
        assert!(!reservation.is_paid());
    }
}
