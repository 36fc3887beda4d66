//! Configuration for the reservation service

use stay_shared::config::booking::{DEFAULT_PRICE_TOLERANCE, DEFAULT_SERVICE_FEE_RATE};
use stay_shared::BookingConfig;

/// Pricing rules applied when a payment is confirmed
#[derive(Debug, Clone)]
pub struct ReservationPolicyConfig {
    /// Multiplier applied to the nightly room cost
    pub service_fee_rate: f64,
    /// Allowed absolute difference between paid and expected amounts
    pub price_tolerance: f64,
}

impl Default for ReservationPolicyConfig {
    fn default() -> Self {
        Self {
            service_fee_rate: DEFAULT_SERVICE_FEE_RATE,
            price_tolerance: DEFAULT_PRICE_TOLERANCE,
        }
    }
}

impl From<&BookingConfig> for ReservationPolicyConfig {
    fn from(config: &BookingConfig) -> Self {
        Self {
            service_fee_rate: config.service_fee_rate,
            price_tolerance: config.price_tolerance,
        }
    }
}
