//! Configuration for the analytics service

use stay_shared::config::booking::DEFAULT_RECOMMEND_THRESHOLD;
use stay_shared::BookingConfig;

#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Previous-month occupancy rate at or above which a room is recommended
    pub recommend_threshold: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            recommend_threshold: DEFAULT_RECOMMEND_THRESHOLD,
        }
    }
}

impl From<&BookingConfig> for AnalyticsConfig {
    fn from(config: &BookingConfig) -> Self {
        Self {
            recommend_threshold: config.recommend_threshold,
        }
    }
}
