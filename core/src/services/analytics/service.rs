//! Occupancy and income analytics for hosts

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::{Reservation, StayWindow, User};
use crate::domain::value_objects::MonthlyIncome;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ReservationRepository;

use super::calendar::previous_month_bounds;
use super::config::AnalyticsConfig;

pub struct AnalyticsService<R: ReservationRepository> {
    reservation_repository: Arc<R>,
    clock: Arc<dyn Clock>,
    config: AnalyticsConfig,
}

impl<R: ReservationRepository> AnalyticsService<R> {
    pub fn new(reservation_repository: Arc<R>, config: AnalyticsConfig) -> Self {
        Self {
            reservation_repository,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Reservations of the room checking in during the previous calendar month
    pub async fn before_month_reservations(&self, room_id: Uuid) -> DomainResult<Vec<Reservation>> {
        let (first, last) = self.previous_month()?;
        self.reservation_repository
            .find_by_date_range_and_room(room_id, first, last)
            .await
    }

    /// Fraction of the previous month's days covered by at least one stay
    /// window of the room, wherever that stay starts or ends.
    pub async fn before_month_reservation_rate(&self, room_id: Uuid) -> DomainResult<f64> {
        let (first, last) = self.previous_month()?;
        let month_end = last.succ_opt().ok_or_else(|| DomainError::Internal {
            message: format!("No day after {}", last),
        })?;
        let reservations = self
            .reservation_repository
            .find_overlapping(room_id, StayWindow::new(first, month_end))
            .await?;

        let rate = occupancy_rate(&reservations, first, last);

        tracing::debug!(
            room_id = %room_id,
            month = %first.format("%Y-%m"),
            reservations = reservations.len(),
            rate = rate,
            "Computed previous month occupancy"
        );

        Ok(rate)
    }

    /// Whether the room's previous-month occupancy reaches the recommendation threshold
    pub async fn check_recommended_room(&self, room_id: Uuid) -> DomainResult<bool> {
        let rate = self.before_month_reservation_rate(room_id).await?;
        Ok(rate >= self.config.recommend_threshold)
    }

    /// Paid reservations on the host's rooms checking in during `year`
    pub async fn filter_by_host_and_year(
        &self,
        host: &User,
        year: i32,
    ) -> DomainResult<Vec<Reservation>> {
        let reservations = self
            .reservation_repository
            .find_by_host_with_payment(host.id)
            .await?;

        Ok(reservations
            .into_iter()
            .filter(|r| r.check_in.year() == year)
            .collect())
    }

    /// Sum paid amounts into the bucket of each reservation's check-in month
    pub fn aggregate_income_by_month(&self, reservations: &[Reservation]) -> MonthlyIncome {
        let mut income = MonthlyIncome::new();
        for reservation in reservations {
            if let Some(payment) = &reservation.payment {
                income.add(reservation.check_in.month(), payment.price);
            }
        }
        income
    }

    /// Monthly income of the host for `year`
    pub async fn host_income(&self, host: &User, year: i32) -> DomainResult<MonthlyIncome> {
        let reservations = self.filter_by_host_and_year(host, year).await?;
        let income = self.aggregate_income_by_month(&reservations);

        tracing::info!(
            host_id = %host.id,
            year = year,
            reservations = reservations.len(),
            total = income.total(),
            event = "host_income_computed",
            "Aggregated host income"
        );

        Ok(income)
    }

    fn previous_month(&self) -> DomainResult<(NaiveDate, NaiveDate)> {
        let today = self.clock.today();
        previous_month_bounds(today).ok_or_else(|| DomainError::Internal {
            message: format!("No previous month for {}", today),
        })
    }
}

fn occupancy_rate(reservations: &[Reservation], first: NaiveDate, last: NaiveDate) -> f64 {
    let days = (last - first).num_days() + 1;
    if days <= 0 || reservations.is_empty() {
        return 0.0;
    }

    let covered = first
        .iter_days()
        .take(days as usize)
        .filter(|day| reservations.iter().any(|r| r.window().contains(*day)))
        .count();

    covered as f64 / days as f64
}
