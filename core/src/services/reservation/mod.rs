//! Reservation lifecycle module
//!
//! This module covers a booking from request to cancellation:
//! - Date sanity and half-open overlap checks
//! - Conflict-free creation backed by the repository's atomic insert
//! - Payment verification, recording and gateway confirmation
//! - Gateway-first cancellation and refund

mod availability;
mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use availability::{check_available_date, check_strange_date};
pub use config::ReservationPolicyConfig;
pub use service::ReservationService;
pub use traits::{AccessToken, GatewayReceipt, PaymentGateway};
pub use types::{CancelRequest, NewReservation, PaymentReceipt, ReservationSummary};
