//! In-memory implementation of ReservationRepository for development and testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use stay_shared::{PaginatedResponse, Pagination};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Reservation, StayWindow};
use crate::errors::{DomainError, ReservationError};

use super::trait_::ReservationRepository;

/// Mock reservation repository backed by a HashMap
pub struct MockReservationRepository {
    reservations: Arc<RwLock<HashMap<Uuid, Reservation>>>,
}

impl MockReservationRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            reservations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored reservations
    pub async fn count(&self) -> usize {
        self.reservations.read().await.len()
    }

    async fn select<F>(&self, predicate: F) -> Vec<Reservation>
    where
        F: Fn(&Reservation) -> bool,
    {
        let reservations = self.reservations.read().await;
        let mut found: Vec<Reservation> = reservations
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.check_in, r.created_at));
        found
    }
}

impl Default for MockReservationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for MockReservationRepository {
    async fn save(&self, reservation: Reservation) -> Result<Reservation, DomainError> {
        let mut reservations = self.reservations.write().await;
        reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn insert_if_available(
        &self,
        reservation: Reservation,
    ) -> Result<Reservation, DomainError> {
        // Check and insert under the same write guard
        let mut reservations = self.reservations.write().await;

        let window = reservation.window();
        if let Some(existing) = reservations
            .values()
            .filter(|r| r.room_id() == reservation.room_id() && r.id != reservation.id)
            .find(|r| r.window().overlaps(&window))
        {
            return Err(ReservationError::ReservationConflict {
                room_id: reservation.room_id(),
                conflicting_id: existing.id,
            }
            .into());
        }

        reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, DomainError> {
        let reservations = self.reservations.read().await;
        Ok(reservations.get(&id).cloned())
    }

    async fn find_by_room_id(&self, room_id: Uuid) -> Result<Vec<Reservation>, DomainError> {
        Ok(self.select(|r| r.room_id() == room_id).await)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Reservation>, DomainError> {
        Ok(self.select(|r| r.user_id == user_id).await)
    }

    async fn find_by_user_paged(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> Result<PaginatedResponse<Reservation>, DomainError> {
        let all = self.select(|r| r.user_id == user_id).await;
        Ok(PaginatedResponse::from_items(all, pagination))
    }

    async fn find_by_date_range_and_room(
        &self,
        room_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Reservation>, DomainError> {
        Ok(self
            .select(|r| r.room_id() == room_id && r.check_in >= start && r.check_in <= end)
            .await)
    }

    async fn find_overlapping(
        &self,
        room_id: Uuid,
        window: StayWindow,
    ) -> Result<Vec<Reservation>, DomainError> {
        Ok(self
            .select(|r| r.room_id() == room_id && r.window().overlaps(&window))
            .await)
    }

    async fn find_by_host_with_payment(
        &self,
        host_id: Uuid,
    ) -> Result<Vec<Reservation>, DomainError> {
        Ok(self
            .select(|r| r.room.is_hosted_by(host_id) && r.is_paid())
            .await)
    }

    async fn find_by_room_from(
        &self,
        room_id: Uuid,
        from: NaiveDate,
    ) -> Result<Vec<Reservation>, DomainError> {
        Ok(self
            .select(|r| r.room_id() == room_id && r.check_out >= from)
            .await)
    }

    async fn find_by_receipt_id(
        &self,
        receipt_id: &str,
    ) -> Result<Option<Reservation>, DomainError> {
        let reservations = self.reservations.read().await;
        Ok(reservations
            .values()
            .find(|r| r.receipt_id() == Some(receipt_id))
            .cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut reservations = self.reservations.write().await;
        Ok(reservations.remove(&id).is_some())
    }
}
