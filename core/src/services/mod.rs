//! Business services containing domain logic and use cases.

pub mod analytics;
pub mod reservation;

// Re-export commonly used types
pub use analytics::{AnalyticsConfig, AnalyticsService};
pub use reservation::{
    check_available_date, check_strange_date, AccessToken, CancelRequest, GatewayReceipt,
    NewReservation, PaymentGateway, PaymentReceipt, ReservationPolicyConfig, ReservationService,
    ReservationSummary,
};
