//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{PaymentError, ReservationError};

use stay_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Reservation(#[from] ReservationError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Shorthand for a missing reservation
    pub fn reservation_not_found(id: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            resource: format!("Reservation {}", id),
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        let message = self.to_string();
        match self {
            DomainError::Validation { .. } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message)
            }
            DomainError::NotFound { resource } => {
                ErrorResponse::new(error_codes::NOT_FOUND, message).add_detail("resource", resource)
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, message)
            }
            DomainError::Reservation(err) => {
                let response = ErrorResponse::new(err.code(), message);
                match err {
                    ReservationError::InvalidDateRange {
                        check_in,
                        check_out,
                        ..
                    } => response
                        .add_detail("check_in", check_in)
                        .add_detail("check_out", check_out),
                    ReservationError::ReservationConflict {
                        room_id,
                        conflicting_id,
                    } => response
                        .add_detail("room_id", room_id)
                        .add_detail("conflicting_reservation_id", conflicting_id),
                }
            }
            DomainError::Payment(err) => {
                let response = ErrorResponse::new(err.code(), message);
                match err {
                    PaymentError::VerificationFailed { receipt_id, .. } => {
                        response.add_detail("receipt_id", receipt_id)
                    }
                    PaymentError::Gateway { .. } => response,
                }
            }
        }
    }
}
