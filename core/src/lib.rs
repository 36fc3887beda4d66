//! # StayHub Core
//!
//! Core business logic and domain layer for the StayHub backend.
//! This crate contains the reservation and payment entities, the availability
//! rules, the reservation lifecycle and host analytics services, repository
//! interfaces with in-memory implementations, and the domain error types.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::{
    Comment, Location, MonthlyIncome, Payment, Reservation, Room, StayStatus, StayWindow, User,
};
pub use errors::{DomainError, DomainResult, PaymentError, ReservationError};
pub use repositories::{
    MockPaymentRepository, MockReservationRepository, MockRoomRepository, PaymentRepository,
    ReservationRepository, RoomRepository,
};
pub use services::{
    AnalyticsService, NewReservation, PaymentGateway, PaymentReceipt, ReservationService,
};
