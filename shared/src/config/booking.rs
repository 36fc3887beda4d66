//! Reservation pricing and analytics configuration

use serde::{Deserialize, Serialize};

/// Default multiplier applied to the nightly room cost (10% service fee)
pub const DEFAULT_SERVICE_FEE_RATE: f64 = 1.1;

/// Default previous-month occupancy rate at which a room is recommended
pub const DEFAULT_RECOMMEND_THRESHOLD: f64 = 0.8;

/// Default allowed difference between a paid amount and the expected cost
pub const DEFAULT_PRICE_TOLERANCE: f64 = 0.01;

/// Business rules used by the reservation lifecycle and host analytics
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingConfig {
    /// Multiplier applied to `room_cost * nights` when computing the expected payment
    #[serde(default = "default_service_fee_rate")]
    pub service_fee_rate: f64,

    /// Occupancy rate (0.0 - 1.0) at or above which a room is flagged as recommended
    #[serde(default = "default_recommend_threshold")]
    pub recommend_threshold: f64,

    /// Absolute tolerance when comparing a gateway amount with the expected cost
    #[serde(default = "default_price_tolerance")]
    pub price_tolerance: f64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            service_fee_rate: DEFAULT_SERVICE_FEE_RATE,
            recommend_threshold: DEFAULT_RECOMMEND_THRESHOLD,
            price_tolerance: DEFAULT_PRICE_TOLERANCE,
        }
    }
}

impl BookingConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service_fee_rate: env_f64("BOOKING_SERVICE_FEE_RATE", defaults.service_fee_rate),
            recommend_threshold: env_f64(
                "BOOKING_RECOMMEND_THRESHOLD",
                defaults.recommend_threshold,
            ),
            price_tolerance: env_f64("BOOKING_PRICE_TOLERANCE", defaults.price_tolerance),
        }
    }

    /// Set the recommendation threshold, clamped to `0.0..=1.0`
    pub fn with_recommend_threshold(mut self, threshold: f64) -> Self {
        self.recommend_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the service fee multiplier
    pub fn with_service_fee_rate(mut self, rate: f64) -> Self {
        self.service_fee_rate = rate;
        self
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_service_fee_rate() -> f64 {
    DEFAULT_SERVICE_FEE_RATE
}

fn default_recommend_threshold() -> f64 {
    DEFAULT_RECOMMEND_THRESHOLD
}

fn default_price_tolerance() -> f64 {
    DEFAULT_PRICE_TOLERANCE
}
