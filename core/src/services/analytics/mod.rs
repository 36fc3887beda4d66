//! Host analytics: previous-month occupancy and yearly income

mod calendar;
mod config;
mod service;


pub use calendar::{days_in_month, month_bounds, previous_month_bounds};
pub use config::AnalyticsConfig;
pub use service::AnalyticsService;
