//! Main reservation lifecycle service implementation

use std::sync::Arc;

use chrono::NaiveDate;
use stay_shared::{PaginatedResponse, Pagination};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::{Comment, Payment, Reservation, Room, StayWindow, User};
use crate::errors::{DomainError, DomainResult, PaymentError, ReservationError};
use crate::repositories::{PaymentRepository, ReservationRepository, RoomRepository};

use super::availability::{check_available_date, check_strange_date};
use super::config::ReservationPolicyConfig;
use super::traits::PaymentGateway;
use super::types::{CancelRequest, NewReservation, PaymentReceipt, ReservationSummary};

/// Reservation service for booking, paying for and cancelling stays
pub struct ReservationService<R, P, M, G>
where
    R: ReservationRepository,
    P: PaymentRepository,
    M: RoomRepository,
    G: PaymentGateway + ?Sized,
{
    /// Reservation persistence
    reservation_repository: Arc<R>,
    /// Payment persistence
    payment_repository: Arc<P>,
    /// Read-only room listings
    room_repository: Arc<M>,
    /// External payment gateway
    payment_gateway: Arc<G>,
    /// Source of "today"
    clock: Arc<dyn Clock>,
    /// Pricing rules
    config: ReservationPolicyConfig,
}

impl<R, P, M, G> ReservationService<R, P, M, G>
where
    R: ReservationRepository,
    P: PaymentRepository,
    M: RoomRepository,
    G: PaymentGateway + ?Sized,
{
    /// Create a new reservation service using the system clock
    pub fn new(
        reservation_repository: Arc<R>,
        payment_repository: Arc<P>,
        room_repository: Arc<M>,
        payment_gateway: Arc<G>,
        config: ReservationPolicyConfig,
    ) -> Self {
        Self {
            reservation_repository,
            payment_repository,
            room_repository,
            payment_gateway,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the clock used to determine the current date
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Create a pending reservation for `room`
    ///
    /// This method:
    /// 1. Rejects stays starting before today or spanning no night
    /// 2. Validates the guest count against the room's limit
    /// 3. Scans the room's existing reservations for an overlapping window
    /// 4. Inserts through the repository's atomic availability check
    ///
    /// # Returns
    ///
    /// * `Ok(Reservation)` - The persisted pending reservation
    /// * `Err(DomainError)` - `InvalidDateRange`, `ReservationConflict` or a
    ///   validation error; nothing is written in those cases
    pub async fn create(
        &self,
        room: &Room,
        user: &User,
        request: NewReservation,
    ) -> DomainResult<Reservation> {
        let NewReservation {
            check_in,
            check_out,
            guest_num,
            total_cost,
        } = request;

        check_strange_date(self.clock.today(), check_in, check_out)?;
        Self::validate_guests(room, guest_num)?;

        if !total_cost.is_finite() || total_cost < 0.0 {
            return Err(DomainError::Validation {
                message: format!("Invalid total cost: {}", total_cost),
            });
        }

        let existing = self.reservation_repository.find_by_room_id(room.id).await?;
        if let Err(e) = check_available_date(&existing, check_in, check_out) {
            tracing::info!(
                room_id = %room.id,
                user_id = %user.id,
                %check_in,
                %check_out,
                event = "reservation_conflict",
                "Requested dates overlap an existing reservation"
            );
            return Err(e);
        }

        let reservation = Reservation::new(
            room.clone(),
            user.id,
            check_in,
            check_out,
            guest_num,
            total_cost,
        );

        let reservation = self
            .reservation_repository
            .insert_if_available(reservation)
            .await
            .map_err(|e| {
                if matches!(
                    e,
                    DomainError::Reservation(ReservationError::ReservationConflict { .. })
                ) {
                    tracing::warn!(
                        room_id = %room.id,
                        user_id = %user.id,
                        event = "reservation_conflict_on_insert",
                        "Concurrent reservation took the requested dates"
                    );
                }
                e
            })?;

        tracing::info!(
            reservation_id = %reservation.id,
            room_id = %room.id,
            user_id = %user.id,
            %check_in,
            %check_out,
            event = "reservation_created",
            "Created pending reservation"
        );

        Ok(reservation)
    }

    /// Load the room by id and create a reservation for it
    pub async fn reserve(
        &self,
        user: &User,
        room_id: Uuid,
        request: NewReservation,
    ) -> DomainResult<Reservation> {
        let room = self
            .room_repository
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("Room {}", room_id),
            })?;

        self.create(&room, user, request).await
    }

    /// Verify a gateway receipt and attach it to the user's reservation
    ///
    /// This method:
    /// 1. Computes the expected amount: `tax + cleaning_cost + room_cost * fee_rate * nights`
    /// 2. Checks the reported amount and that no reservation already carries
    ///    the receipt, then verifies the receipt with the gateway
    /// 3. Stores the payment and attaches it to the reservation
    /// 4. Confirms the charge with the gateway
    ///
    /// A failed confirmation detaches and deletes the payment again, leaving
    /// the reservation pending. The gateway error is returned even when that
    /// cleanup fails.
    pub async fn confirm_with_payment(
        &self,
        user: &User,
        reservation_id: Uuid,
        receipt: PaymentReceipt,
    ) -> DomainResult<Reservation> {
        let mut reservation = self.find_for_user(user, reservation_id).await?;

        if reservation.is_paid() {
            return Err(DomainError::Validation {
                message: format!("Reservation {} is already paid", reservation_id),
            });
        }

        let expected = self.expected_cost(&reservation);
        if (receipt.price - expected).abs() > self.config.price_tolerance {
            tracing::warn!(
                reservation_id = %reservation_id,
                receipt_id = %receipt.receipt_id,
                reported = receipt.price,
                expected = expected,
                event = "payment_amount_mismatch",
                "Reported payment amount does not match the reservation cost"
            );
            return Err(PaymentError::VerificationFailed {
                receipt_id: receipt.receipt_id,
                reason: format!("paid {:.2} but expected {:.2}", receipt.price, expected),
            }
            .into());
        }

        if let Some(holder) = self
            .reservation_repository
            .find_by_receipt_id(&receipt.receipt_id)
            .await?
        {
            tracing::warn!(
                reservation_id = %reservation_id,
                receipt_id = %receipt.receipt_id,
                holder_id = %holder.id,
                event = "payment_receipt_reused",
                "Receipt already pays for another reservation"
            );
            return Err(PaymentError::VerificationFailed {
                receipt_id: receipt.receipt_id,
                reason: format!("receipt already used by reservation {}", holder.id),
            }
            .into());
        }

        let token = self.payment_gateway.get_access_token().await?;
        let verified = self
            .payment_gateway
            .verify(&token, &receipt.receipt_id, expected)
            .await
            .map_err(|e| {
                tracing::warn!(
                    reservation_id = %reservation_id,
                    receipt_id = %receipt.receipt_id,
                    error = %e,
                    event = "payment_verification_failed",
                    "Gateway rejected the receipt"
                );
                e
            })?;

        let payment = self
            .payment_repository
            .save(Payment::new(verified.receipt_id.clone(), verified.price))
            .await?;
        let payment_id = payment.id;

        reservation.attach_payment(payment);
        let mut reservation = self.reservation_repository.save(reservation).await?;

        if let Err(e) = self
            .payment_gateway
            .confirm(&token, &verified.receipt_id)
            .await
        {
            tracing::error!(
                reservation_id = %reservation_id,
                receipt_id = %verified.receipt_id,
                error = %e,
                event = "payment_confirm_failed",
                "Gateway confirmation failed, rolling back payment"
            );

            reservation.detach_payment();
            if let Err(cleanup) = self.reservation_repository.save(reservation).await {
                tracing::error!(
                    reservation_id = %reservation_id,
                    error = %cleanup,
                    event = "payment_rollback_failed",
                    "Could not detach payment from reservation"
                );
            }
            if let Err(cleanup) = self.payment_repository.delete_by_id(payment_id).await {
                tracing::error!(
                    reservation_id = %reservation_id,
                    payment_id = %payment_id,
                    error = %cleanup,
                    event = "payment_rollback_failed",
                    "Could not delete payment record"
                );
            }
            return Err(e.into());
        }

        tracing::info!(
            reservation_id = %reservation_id,
            receipt_id = %verified.receipt_id,
            price = verified.price,
            event = "reservation_paid",
            "Payment verified and confirmed"
        );

        Ok(reservation)
    }

    /// Cancel the user's reservation, refunding the payment first if there is one.
    ///
    /// The local records are only removed after the gateway accepted the
    /// refund. A second cancel of the same reservation yields `NotFound`.
    pub async fn cancel(
        &self,
        user: &User,
        reservation_id: Uuid,
        request: CancelRequest,
    ) -> DomainResult<()> {
        let reservation = self.find_for_user(user, reservation_id).await?;

        if let Some(payment) = &reservation.payment {
            let request = request.with_receipt_id(payment.receipt_id.clone());
            let token = self.payment_gateway.get_access_token().await?;

            self.payment_gateway
                .cancel(&request, &token)
                .await
                .map_err(|e| {
                    tracing::error!(
                        reservation_id = %reservation_id,
                        receipt_id = %payment.receipt_id,
                        error = %e,
                        event = "payment_cancel_failed",
                        "Gateway refused the refund, reservation kept"
                    );
                    e
                })?;

            self.payment_repository.delete_by_id(payment.id).await?;
        }

        if !self
            .reservation_repository
            .delete_by_id(reservation_id)
            .await?
        {
            return Err(DomainError::reservation_not_found(reservation_id));
        }

        tracing::info!(
            reservation_id = %reservation_id,
            user_id = %user.id,
            refunded = reservation.is_paid(),
            event = "reservation_cancelled",
            "Reservation cancelled"
        );

        Ok(())
    }

    /// Link a review to the user's reservation
    pub async fn attach_comment(
        &self,
        user: &User,
        reservation_id: Uuid,
        comment: &Comment,
    ) -> DomainResult<Reservation> {
        let mut reservation = self.find_for_user(user, reservation_id).await?;

        if reservation.comment_existed {
            return Err(DomainError::Validation {
                message: format!("Reservation {} already has a review", reservation_id),
            });
        }

        reservation.attach_comment(comment.id);
        let reservation = self.reservation_repository.save(reservation).await?;

        tracing::debug!(
            reservation_id = %reservation_id,
            comment_id = %comment.id,
            "Attached review to reservation"
        );

        Ok(reservation)
    }

    pub async fn find_by_id(&self, reservation_id: Uuid) -> DomainResult<Reservation> {
        self.reservation_repository
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| DomainError::reservation_not_found(reservation_id))
    }

    /// Find a reservation owned by `user`. Reservations of other users are
    /// reported as not found.
    pub async fn find_for_user(
        &self,
        user: &User,
        reservation_id: Uuid,
    ) -> DomainResult<Reservation> {
        match self.reservation_repository.find_by_id(reservation_id).await? {
            Some(reservation) if reservation.is_owned_by(user.id) => Ok(reservation),
            Some(_) => {
                tracing::warn!(
                    reservation_id = %reservation_id,
                    user_id = %user.id,
                    event = "reservation_access_denied",
                    "User requested a reservation they do not own"
                );
                Err(DomainError::reservation_not_found(reservation_id))
            }
            None => Err(DomainError::reservation_not_found(reservation_id)),
        }
    }

    /// One page of the user's trips with their current status
    pub async fn list_for_user(
        &self,
        user: &User,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<ReservationSummary>> {
        let today = self.clock.today();
        let page = self
            .reservation_repository
            .find_by_user_paged(user.id, pagination)
            .await?;

        Ok(page.map(|r| ReservationSummary::new(&r, today)))
    }

    pub async fn list_all_for_user(&self, user: &User) -> DomainResult<Vec<Reservation>> {
        self.reservation_repository.find_by_user(user.id).await
    }

    /// Occupied windows of a room that end on or after `from`
    pub async fn reserved_windows(
        &self,
        room_id: Uuid,
        from: NaiveDate,
    ) -> DomainResult<Vec<StayWindow>> {
        let reservations = self
            .reservation_repository
            .find_by_room_from(room_id, from)
            .await?;

        Ok(reservations.iter().map(Reservation::window).collect())
    }

    /// Delete a reservation that has not been paid yet
    pub async fn delete_unpaid(&self, user: &User, reservation_id: Uuid) -> DomainResult<()> {
        let reservation = self.find_for_user(user, reservation_id).await?;

        if reservation.is_paid() {
            return Err(DomainError::Validation {
                message: format!(
                    "Reservation {} is paid and must be cancelled with a refund",
                    reservation_id
                ),
            });
        }

        if !self
            .reservation_repository
            .delete_by_id(reservation_id)
            .await?
        {
            return Err(DomainError::reservation_not_found(reservation_id));
        }

        tracing::info!(
            reservation_id = %reservation_id,
            user_id = %user.id,
            event = "reservation_deleted",
            "Deleted unpaid reservation"
        );

        Ok(())
    }

    /// Amount the gateway must have charged for the reservation
    pub fn expected_cost(&self, reservation: &Reservation) -> f64 {
        reservation
            .room
            .stay_cost(reservation.nights(), self.config.service_fee_rate)
    }

    fn validate_guests(room: &Room, guest_num: u32) -> DomainResult<()> {
        if guest_num == 0 {
            return Err(DomainError::Validation {
                message: "At least one guest is required".to_string(),
            });
        }
        if guest_num > room.people_limit {
            return Err(DomainError::Validation {
                message: format!(
                    "Room {} accepts at most {} guests, requested {}",
                    room.id, room.people_limit, guest_num
                ),
            });
        }
        Ok(())
    }
}
