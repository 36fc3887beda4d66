//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the StayHub application.
//! It provides concrete implementations of the core repository and payment
//! gateway traits, plus the process-level plumbing around them.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL repositories using SQLx
//! - **Payment**: BootPay REST client and an in-memory gateway
//! - **Config**: layered configuration loading
//! - **Telemetry**: tracing subscriber setup
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use stay_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Payment gateway clients
pub mod payment;

/// Layered configuration loading
pub mod config;

/// Tracing subscriber initialisation
pub mod telemetry;

#[cfg(feature = "mysql")]
use std::sync::Arc;

#[cfg(feature = "mysql")]
use stay_core::services::{
    AnalyticsConfig, AnalyticsService, PaymentGateway, ReservationPolicyConfig,
    ReservationService,
};
#[cfg(feature = "mysql")]
use stay_shared::AppConfig;

#[cfg(feature = "mysql")]
use database::{
    DatabasePool, MySqlPaymentRepository, MySqlReservationRepository, MySqlRoomRepository,
};

/// Reservation service wired to MySQL and the configured gateway
#[cfg(feature = "mysql")]
pub type MySqlReservationService = ReservationService<
    MySqlReservationRepository,
    MySqlPaymentRepository,
    MySqlRoomRepository,
    dyn PaymentGateway,
>;

/// Infrastructure service container
#[cfg(feature = "mysql")]
#[derive(Clone)]
pub struct InfrastructureServices {
    pub config: AppConfig,
    pub database: DatabasePool,
    pub reservation_repository: Arc<MySqlReservationRepository>,
    pub payment_repository: Arc<MySqlPaymentRepository>,
    pub room_repository: Arc<MySqlRoomRepository>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
}

#[cfg(feature = "mysql")]
impl InfrastructureServices {
    /// Reservation lifecycle service over the shared repositories
    pub fn reservation_service(&self) -> MySqlReservationService {
        ReservationService::new(
            self.reservation_repository.clone(),
            self.payment_repository.clone(),
            self.room_repository.clone(),
            self.payment_gateway.clone(),
            ReservationPolicyConfig::from(&self.config.booking),
        )
    }

    /// Host analytics service over the shared reservation repository
    pub fn analytics_service(&self) -> AnalyticsService<MySqlReservationRepository> {
        AnalyticsService::new(
            self.reservation_repository.clone(),
            AnalyticsConfig::from(&self.config.booking),
        )
    }
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - Configuration (dotenv, config file, environment)
/// - Tracing subscriber
/// - Database connection pool
/// - Payment gateway client
#[cfg(feature = "mysql")]
pub async fn initialize() -> anyhow::Result<InfrastructureServices> {
    let config = config::load_config()?;
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        payment_provider = ?config.payment.provider,
        "Initializing infrastructure services..."
    );

    let database = DatabasePool::new(config.database.clone()).await?;
    let pool = database.get_pool().clone();
    let payment_gateway = payment::create_payment_gateway(
        &config.payment,
        config.booking.price_tolerance,
        config.environment.is_production(),
    )?;

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        reservation_repository: Arc::new(MySqlReservationRepository::new(pool.clone())),
        payment_repository: Arc::new(MySqlPaymentRepository::new(pool.clone())),
        room_repository: Arc::new(MySqlRoomRepository::new(pool)),
        payment_gateway,
        database,
        config,
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration source could not be read or deserialized
    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Payment gateway answered with an error
    #[error("Payment gateway error: {0}")]
    Gateway(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Http(e) => PaymentError::Gateway {
                message: e.to_string(),
            }
            .into(),
            InfrastructureError::Gateway(message) => PaymentError::Gateway { message }.into(),
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
