//! Domain-specific error types for reservations and payments

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Reservation-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReservationError {
    #[error("Invalid stay dates {check_in} ~ {check_out}: {reason}")]
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
        reason: String,
    },

    #[error("Room {room_id} is already reserved for the requested dates (conflicts with reservation {conflicting_id})")]
    ReservationConflict { room_id: Uuid, conflicting_id: Uuid },
}

/// Payment gateway related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    #[error("Payment verification failed for receipt {receipt_id}: {reason}")]
    VerificationFailed { receipt_id: String, reason: String },

    #[error("Payment gateway error: {message}")]
    Gateway { message: String },
}

impl ReservationError {
    /// Stable error code for the response envelope
    pub fn code(&self) -> &'static str {
        match self {
            ReservationError::InvalidDateRange { .. } => stay_shared::error_codes::INVALID_DATE_RANGE,
            ReservationError::ReservationConflict { .. } => {
                stay_shared::error_codes::RESERVATION_CONFLICT
            }
        }
    }
}

impl PaymentError {
    /// Stable error code for the response envelope
    pub fn code(&self) -> &'static str {
        match self {
            PaymentError::VerificationFailed { .. } => {
                stay_shared::error_codes::PAYMENT_VERIFICATION_FAILED
            }
            PaymentError::Gateway { .. } => stay_shared::error_codes::PAYMENT_GATEWAY_ERROR,
        }
    }
}
