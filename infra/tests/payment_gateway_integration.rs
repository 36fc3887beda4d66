//! Integration tests for the reservation lifecycle against the in-memory gateway

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use stay_core::domain::entities::{Location, Room, User};
    use stay_core::errors::{DomainError, PaymentError};
    use stay_core::repositories::{
        MockPaymentRepository, MockReservationRepository, MockRoomRepository,
        ReservationRepository,
    };
    use stay_core::services::{
        CancelRequest, NewReservation, PaymentGateway, PaymentReceipt, ReservationPolicyConfig,
        ReservationService,
    };
    use stay_core::FixedClock;
    use stay_infra::payment::{create_payment_gateway, MockPaymentGateway};
    use stay_shared::PaymentGatewayConfig;

    type Service = ReservationService<
        MockReservationRepository,
        MockPaymentRepository,
        MockRoomRepository,
        dyn PaymentGateway,
    >;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixture {
        service: Service,
        reservations: Arc<MockReservationRepository>,
        gateway: MockPaymentGateway,
        room: Room,
        guest: User,
    }

    async fn fixture() -> Fixture {
        let host = User::new("Host", "host@example.com");
        let rooms = Arc::new(MockRoomRepository::new());
        let room = rooms
            .insert(
                Room::new(host.id, "Ocean view", 100.0, 20.0, 10.0, Location::default())
                    .with_people_limit(4),
            )
            .await;

        let reservations = Arc::new(MockReservationRepository::new());
        let gateway = MockPaymentGateway::default();
        let shared: Arc<dyn PaymentGateway> = Arc::new(gateway.clone());

        let service = ReservationService::new(
            reservations.clone(),
            Arc::new(MockPaymentRepository::new()),
            rooms,
            shared,
            ReservationPolicyConfig::default(),
        )
        .with_clock(Arc::new(FixedClock::at_date(date(2024, 3, 1))));

        Fixture {
            service,
            reservations,
            gateway,
            room,
            guest: User::new("Guest", "guest@example.com"),
        }
    }

    fn request() -> NewReservation {
        NewReservation {
            check_in: date(2024, 3, 10),
            check_out: date(2024, 3, 15),
            guest_num: 2,
            total_cost: 580.0,
        }
    }

    #[tokio::test]
    async fn test_pay_then_cancel_refunds_through_gateway() {
        let f = fixture().await;
        f.gateway.register_receipt("rcpt-100", 580.0).await;

        let reservation = f.service.reserve(&f.guest, f.room.id, request()).await.unwrap();
        let paid = f
            .service
            .confirm_with_payment(
                &f.guest,
                reservation.id,
                PaymentReceipt {
                    receipt_id: "rcpt-100".to_string(),
                    price: 580.0,
                },
            )
            .await
            .unwrap();

        assert_eq!(paid.receipt_id(), Some("rcpt-100"));
        assert_eq!(f.gateway.receipt("rcpt-100").await.unwrap().status, "confirmed");

        f.service
            .cancel(&f.guest, reservation.id, CancelRequest::new("Guest", "plans changed"))
            .await
            .unwrap();

        let refunds = f.gateway.refunds().await;
        assert_eq!(refunds.len(), 1);
        assert_eq!(refunds[0].receipt_id.as_deref(), Some("rcpt-100"));
        assert!(f.reservations.find_by_id(reservation.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_capture_leaves_reservation_unpaid() {
        let f = fixture().await;
        f.gateway.register_receipt("rcpt-200", 580.0).await;
        f.gateway.set_fail_confirm(true);

        let reservation = f.service.reserve(&f.guest, f.room.id, request()).await.unwrap();
        let err = f
            .service
            .confirm_with_payment(
                &f.guest,
                reservation.id,
                PaymentReceipt {
                    receipt_id: "rcpt-200".to_string(),
                    price: 580.0,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Payment(PaymentError::Gateway { .. })));
        let stored = f.reservations.find_by_id(reservation.id).await.unwrap().unwrap();
        assert!(!stored.is_paid());
    }

    #[tokio::test]
    async fn test_refund_failure_keeps_booking() {
        let f = fixture().await;
        f.gateway.register_receipt("rcpt-300", 580.0).await;

        let reservation = f.service.reserve(&f.guest, f.room.id, request()).await.unwrap();
        f.service
            .confirm_with_payment(
                &f.guest,
                reservation.id,
                PaymentReceipt {
                    receipt_id: "rcpt-300".to_string(),
                    price: 580.0,
                },
            )
            .await
            .unwrap();

        f.gateway.set_fail_cancel(true);
        let result = f
            .service
            .cancel(&f.guest, reservation.id, CancelRequest::new("Guest", "plans changed"))
            .await;

        assert!(result.is_err());
        let stored = f.reservations.find_by_id(reservation.id).await.unwrap().unwrap();
        assert!(stored.is_paid());
    }

    #[tokio::test]
    async fn test_factory_builds_usable_mock_gateway() {
        let gateway = create_payment_gateway(&PaymentGatewayConfig::mock(), 0.01, false).unwrap();
        let token = gateway.get_access_token().await.unwrap();

        let err = gateway.verify(&token, "unknown", 1.0).await.unwrap_err();
        assert!(matches!(err, PaymentError::VerificationFailed { .. }));
    }
}
