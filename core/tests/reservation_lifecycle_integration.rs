//! Integration tests for the reservation lifecycle and host analytics

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use stay_core::errors::{DomainError, PaymentError, ReservationError};
    use stay_core::repositories::{
        MockPaymentRepository, MockReservationRepository, MockRoomRepository,
        ReservationRepository,
    };
    use stay_core::services::analytics::{AnalyticsConfig, AnalyticsService};
    use stay_core::services::reservation::{
        AccessToken, CancelRequest, GatewayReceipt, NewReservation, PaymentGateway,
        PaymentReceipt, ReservationPolicyConfig, ReservationService,
    };
    use stay_core::{FixedClock, Location, Room, User};

    // Gateway that charges whatever amount it is created with
    struct FlatGateway {
        charged: f64,
        refunds: AtomicUsize,
    }

    impl FlatGateway {
        fn new(charged: f64) -> Self {
            Self {
                charged,
                refunds: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for FlatGateway {
        async fn get_access_token(&self) -> Result<AccessToken, PaymentError> {
            Ok(AccessToken::new("it-token"))
        }

        async fn verify(
            &self,
            _token: &AccessToken,
            receipt_id: &str,
            expected_cost: f64,
        ) -> Result<GatewayReceipt, PaymentError> {
            if (self.charged - expected_cost).abs() > 0.01 {
                return Err(PaymentError::VerificationFailed {
                    receipt_id: receipt_id.to_string(),
                    reason: "amount mismatch".to_string(),
                });
            }
            Ok(GatewayReceipt {
                receipt_id: receipt_id.to_string(),
                price: self.charged,
                status: "paid".to_string(),
            })
        }

        async fn confirm(&self, _token: &AccessToken, _receipt_id: &str) -> Result<(), PaymentError> {
            Ok(())
        }

        async fn cancel(
            &self,
            _request: &CancelRequest,
            _token: &AccessToken,
        ) -> Result<(), PaymentError> {
            self.refunds.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn request(check_in: NaiveDate, check_out: NaiveDate) -> NewReservation {
        NewReservation {
            check_in,
            check_out,
            guest_num: 1,
            total_cost: 0.0,
        }
    }

    struct World {
        service: ReservationService<
            MockReservationRepository,
            MockPaymentRepository,
            MockRoomRepository,
            FlatGateway,
        >,
        reservations: Arc<MockReservationRepository>,
        payments: Arc<MockPaymentRepository>,
        gateway: Arc<FlatGateway>,
        host: User,
        room: Room,
    }

    async fn world(charged: f64, today: NaiveDate) -> World {
        let reservations = Arc::new(MockReservationRepository::new());
        let payments = Arc::new(MockPaymentRepository::new());
        let rooms = Arc::new(MockRoomRepository::new());
        let gateway = Arc::new(FlatGateway::new(charged));

        let host = User::new("Host", "host@example.com");
        let room = rooms
            .insert(Room::new(host.id, "Room R", 100.0, 20.0, 10.0, Location::default()))
            .await;

        let service = ReservationService::new(
            reservations.clone(),
            payments.clone(),
            rooms,
            gateway.clone(),
            ReservationPolicyConfig::default(),
        )
        .with_clock(Arc::new(FixedClock::at_date(today)));

        World {
            service,
            reservations,
            payments,
            gateway,
            host,
            room,
        }
    }

    #[tokio::test]
    async fn test_march_2024_scenario() {
        let w = world(580.0, date(3, 1)).await;
        let guest = User::new("Guest", "guest@example.com");

        let confirmed = w
            .service
            .reserve(&guest, w.room.id, request(date(3, 10), date(3, 15)))
            .await
            .unwrap();
        w.service
            .confirm_with_payment(
                &guest,
                confirmed.id,
                PaymentReceipt {
                    receipt_id: "rcpt-R".to_string(),
                    price: 580.0,
                },
            )
            .await
            .unwrap();

        let overlapping = w
            .service
            .reserve(&guest, w.room.id, request(date(3, 12), date(3, 20)))
            .await;
        assert!(matches!(
            overlapping,
            Err(DomainError::Reservation(ReservationError::ReservationConflict { .. }))
        ));

        let adjacent = w
            .service
            .reserve(&guest, w.room.id, request(date(3, 15), date(3, 20)))
            .await;
        assert!(adjacent.is_ok());
    }

    #[tokio::test]
    async fn test_payment_mismatch_persists_nothing() {
        // Gateway charged less than 10 + 20 + 100 * 1.1 * 5
        let w = world(500.0, date(3, 1)).await;
        let guest = User::new("Guest", "guest@example.com");

        let reservation = w
            .service
            .reserve(&guest, w.room.id, request(date(3, 10), date(3, 15)))
            .await
            .unwrap();

        let result = w
            .service
            .confirm_with_payment(
                &guest,
                reservation.id,
                PaymentReceipt {
                    receipt_id: "rcpt-low".to_string(),
                    price: 580.0,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Payment(PaymentError::VerificationFailed { .. }))
        ));
        assert_eq!(w.payments.count().await, 0);
        assert!(w
            .reservations
            .find_by_receipt_id("rcpt-low")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_cancel_twice_reports_not_found() {
        let w = world(580.0, date(3, 1)).await;
        let guest = User::new("Guest", "guest@example.com");

        let reservation = w
            .service
            .reserve(&guest, w.room.id, request(date(3, 10), date(3, 15)))
            .await
            .unwrap();
        w.service
            .confirm_with_payment(
                &guest,
                reservation.id,
                PaymentReceipt {
                    receipt_id: "rcpt-c".to_string(),
                    price: 580.0,
                },
            )
            .await
            .unwrap();

        w.service
            .cancel(&guest, reservation.id, CancelRequest::new("Guest", "plans changed"))
            .await
            .unwrap();
        let second = w
            .service
            .cancel(&guest, reservation.id, CancelRequest::new("Guest", "plans changed"))
            .await;

        assert!(matches!(second, Err(DomainError::NotFound { .. })));
        assert_eq!(w.gateway.refunds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_paid_stays_feed_host_income() {
        let w = world(580.0, date(3, 1)).await;
        let guest = User::new("Guest", "guest@example.com");

        let reservation = w
            .service
            .reserve(&guest, w.room.id, request(date(3, 10), date(3, 15)))
            .await
            .unwrap();
        w.service
            .confirm_with_payment(
                &guest,
                reservation.id,
                PaymentReceipt {
                    receipt_id: "rcpt-i".to_string(),
                    price: 580.0,
                },
            )
            .await
            .unwrap();
        // Pending stays earn nothing
        w.service
            .reserve(&guest, w.room.id, request(date(7, 1), date(7, 3)))
            .await
            .unwrap();

        let analytics = AnalyticsService::new(w.reservations.clone(), AnalyticsConfig::default())
            .with_clock(Arc::new(FixedClock::at_date(date(4, 2))));

        let income = analytics.host_income(&w.host, 2024).await.unwrap();
        assert!((income.get(3) - 580.0).abs() < 1e-9);
        assert_eq!(income.get(7), 0.0);

        let rate = analytics.before_month_reservation_rate(w.room.id).await.unwrap();
        assert!((rate - 5.0 / 31.0).abs() < 1e-9);
    }
}
