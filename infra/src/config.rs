//! Layered configuration loading
//!
//! Values are resolved in this order, later sources overriding earlier ones:
//! 1. defaults derived from plain environment variables (`AppConfig::from_env`)
//! 2. an optional `config.<environment>` file (toml, yaml or json)
//! 3. `STAY__`-prefixed environment variables, e.g. `STAY__BOOKING__RECOMMEND_THRESHOLD=0.7`

use ::config::{Config, Environment as EnvSource, File};
use stay_shared::{AppConfig, PaymentProvider};

use crate::InfrastructureError;

const ENV_PREFIX: &str = "STAY";

/// Load the application configuration from `.env`, files and the environment
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let base = AppConfig::from_env();
    let file = base.environment.config_file().to_string();
    load_layered(base, &file)
}

/// Merge `base` with the optional `file` and the prefixed environment
pub fn load_layered(base: AppConfig, file: &str) -> Result<AppConfig, InfrastructureError> {
    let settings = Config::builder()
        .add_source(Config::try_from(&base)?)
        .add_source(File::with_name(file).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    let booking = &config.booking;
    if !(0.0..=1.0).contains(&booking.recommend_threshold) {
        return Err(InfrastructureError::Config(format!(
            "booking.recommend_threshold must be within 0.0..=1.0, got {}",
            booking.recommend_threshold
        )));
    }
    if booking.service_fee_rate <= 0.0 {
        return Err(InfrastructureError::Config(format!(
            "booking.service_fee_rate must be positive, got {}",
            booking.service_fee_rate
        )));
    }
    if booking.price_tolerance < 0.0 {
        return Err(InfrastructureError::Config(format!(
            "booking.price_tolerance must not be negative, got {}",
            booking.price_tolerance
        )));
    }
    let database = &config.database;
    if database.max_connections == 0 {
        return Err(InfrastructureError::Config(
            "database.max_connections must be at least 1".to_string(),
        ));
    }
    if database.min_connections > database.max_connections {
        return Err(InfrastructureError::Config(format!(
            "database.min_connections ({}) exceeds database.max_connections ({})",
            database.min_connections, database.max_connections
        )));
    }
    if config.environment.is_production() && config.payment.provider == PaymentProvider::Mock {
        return Err(InfrastructureError::Config(
            "payment.provider must not be mock in production".to_string(),
        ));
    }
    Ok(())
}
