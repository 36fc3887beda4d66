//! Reservation repository trait defining the interface for reservation persistence.
//!
//! The trait is async-first and every method reports storage failures as
//! `DomainError`. Implementations store the room snapshot and the attached
//! payment reference together with the reservation row.

use async_trait::async_trait;
use chrono::NaiveDate;
use stay_shared::{PaginatedResponse, Pagination};
use uuid::Uuid;

use crate::domain::entities::{Reservation, StayWindow};
use crate::errors::DomainError;

/// Repository trait for Reservation entity persistence operations
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert or update a reservation
    ///
    /// # Returns
    /// * `Ok(Reservation)` - The stored reservation
    /// * `Err(DomainError)` - Storage error
    async fn save(&self, reservation: Reservation) -> Result<Reservation, DomainError>;

    /// Insert a new reservation only if no stored reservation for the same room
    /// overlaps its stay window.
    ///
    /// The overlap check and the insert run as one atomic step, so two
    /// concurrent requests for overlapping dates cannot both succeed.
    ///
    /// # Returns
    /// * `Ok(Reservation)` - The inserted reservation
    /// * `Err(DomainError::Reservation(ReservationError::ReservationConflict { .. }))` -
    ///   An overlapping reservation already exists
    /// * `Err(DomainError)` - Storage error
    async fn insert_if_available(
        &self,
        reservation: Reservation,
    ) -> Result<Reservation, DomainError>;

    /// Find a reservation by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Reservation))` - Reservation found
    /// * `Ok(None)` - No reservation with the given ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, DomainError>;

    /// All reservations of a room, ordered by check-in
    async fn find_by_room_id(&self, room_id: Uuid) -> Result<Vec<Reservation>, DomainError>;

    /// All reservations made by a user, ordered by check-in
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Reservation>, DomainError>;

    /// One page of a user's reservations, ordered by check-in
    async fn find_by_user_paged(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> Result<PaginatedResponse<Reservation>, DomainError>;

    /// Reservations of a room whose check-in falls within `[start, end]` (both inclusive)
    async fn find_by_date_range_and_room(
        &self,
        room_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// Reservations of a room whose stay window shares at least one night
    /// with `window`, ordered by check-in
    async fn find_overlapping(
        &self,
        room_id: Uuid,
        window: StayWindow,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// Paid reservations on any room listed by the host
    async fn find_by_host_with_payment(
        &self,
        host_id: Uuid,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// Reservations of a room that check out on or after `from`
    async fn find_by_room_from(
        &self,
        room_id: Uuid,
        from: NaiveDate,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// Reservation whose attached payment carries the given gateway receipt
    async fn find_by_receipt_id(
        &self,
        receipt_id: &str,
    ) -> Result<Option<Reservation>, DomainError>;

    /// Delete a reservation
    ///
    /// # Returns
    /// * `Ok(true)` - Reservation was deleted
    /// * `Ok(false)` - Reservation not found
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError>;
}
