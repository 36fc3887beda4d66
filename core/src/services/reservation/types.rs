//! Request and result types for the reservation service

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Reservation, StayStatus};

/// Booking request for a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_num: u32,
    /// Total quoted to the guest
    pub total_cost: f64,
}

/// Receipt reported by the client after paying through the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub receipt_id: String,
    pub price: f64,
}

/// Refund request forwarded to the gateway.
///
/// `receipt_id` is filled in by the service from the reservation's payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub receipt_id: Option<String>,
    /// Name of whoever requested the cancellation
    pub name: String,
    pub reason: String,
    /// Partial refund amount; `None` refunds the whole charge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl CancelRequest {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            receipt_id: None,
            name: name.into(),
            reason: reason.into(),
            price: None,
        }
    }

    pub fn with_receipt_id(mut self, receipt_id: impl Into<String>) -> Self {
        self.receipt_id = Some(receipt_id.into());
        self
    }
}

/// Trip list entry shown to a guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationSummary {
    pub reservation_id: Uuid,
    pub room_id: Uuid,
    pub room_name: String,
    pub address: String,
    pub bed_num: u32,
    pub guest_num: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_cost: f64,
    pub paid: bool,
    pub comment_existed: bool,
    pub status: StayStatus,
}

impl ReservationSummary {
    pub fn new(reservation: &Reservation, today: NaiveDate) -> Self {
        Self {
            reservation_id: reservation.id,
            room_id: reservation.room_id(),
            room_name: reservation.room.name.clone(),
            address: reservation.room.location.full_address(),
            bed_num: reservation.room.bed_num,
            guest_num: reservation.guest_num,
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            total_cost: reservation.total_cost,
            paid: reservation.is_paid(),
            comment_existed: reservation.comment_existed,
            status: reservation.status(today),
        }
    }
}
