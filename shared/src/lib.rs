//! Shared utilities and common types for the StayHub server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Pagination and location types

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BookingConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    PaymentGatewayConfig, PaymentProvider,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use types::{Coordinate, PaginatedResponse, Pagination, Uuid};
