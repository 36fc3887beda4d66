//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `booking` - Pricing and recommendation rules for reservations
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `payment` - Payment gateway provider and credentials

pub mod booking;
pub mod database;
pub mod environment;
pub mod payment;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use booking::BookingConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use payment::{PaymentGatewayConfig, PaymentProvider};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Payment gateway configuration
    pub payment: PaymentGatewayConfig,

    /// Reservation pricing and analytics rules
    #[serde(default)]
    pub booking: BookingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            payment: PaymentGatewayConfig::default(),
            booking: BookingConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/stayhub_dev"),
            payment: PaymentGatewayConfig::mock(),
            booking: BookingConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig::new("mysql://prod-db:3306/stayhub")
                .with_max_connections(50),
            payment: PaymentGatewayConfig::default(),
            booking: BookingConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        config.database = DatabaseConfig::from_env();
        config.payment = PaymentGatewayConfig::from_env();
        config.booking = BookingConfig::from_env();
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        config
    }
}
