//! Payment gateway module
//!
//! Provides the BootPay REST client and an in-memory gateway, plus a factory
//! that picks one from configuration.

pub mod bootpay;
pub mod mock_gateway;
pub mod models;

pub use bootpay::BootpayGateway;
pub use mock_gateway::MockPaymentGateway;

use std::sync::Arc;

use stay_core::services::PaymentGateway;
use stay_shared::{PaymentGatewayConfig, PaymentProvider};

use crate::InfrastructureError;

/// Create a payment gateway based on configuration
///
/// The in-memory gateway is never handed out in production. Outside
/// production a BootPay provider without credentials falls back to it.
pub fn create_payment_gateway(
    config: &PaymentGatewayConfig,
    price_tolerance: f64,
    production: bool,
) -> Result<Arc<dyn PaymentGateway>, InfrastructureError> {
    match config.provider {
        PaymentProvider::Mock if production => Err(InfrastructureError::Config(
            "the mock payment provider cannot be used in production".to_string(),
        )),
        PaymentProvider::Mock => {
            tracing::info!("Using in-memory payment gateway");
            Ok(Arc::new(MockPaymentGateway::new(price_tolerance)))
        }
        PaymentProvider::Bootpay if !config.has_credentials() && !production => {
            tracing::warn!("BootPay credentials missing, falling back to in-memory payment gateway");
            Ok(Arc::new(MockPaymentGateway::new(price_tolerance)))
        }
        PaymentProvider::Bootpay => Ok(Arc::new(BootpayGateway::new(
            config.clone(),
            price_tolerance,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider() {
        let gateway = create_payment_gateway(&PaymentGatewayConfig::mock(), 0.01, false).unwrap();
        assert!(gateway.get_access_token().await.is_ok());
    }

    #[test]
    fn test_mock_provider_rejected_in_production() {
        assert!(matches!(
            create_payment_gateway(&PaymentGatewayConfig::mock(), 0.01, true),
            Err(InfrastructureError::Config(_))
        ));
    }

    #[test]
    fn test_missing_credentials_fall_back_outside_production() {
        let config = PaymentGatewayConfig::default();
        assert!(create_payment_gateway(&config, 0.01, false).is_ok());
    }

    #[test]
    fn test_missing_credentials_rejected_in_production() {
        let config = PaymentGatewayConfig::default();
        assert!(matches!(
            create_payment_gateway(&config, 0.01, true),
            Err(InfrastructureError::Config(_))
        ));
    }

    #[test]
    fn test_bootpay_with_credentials() {
        let config = PaymentGatewayConfig {
            application_id: "app".to_string(),
            private_key: "key".to_string(),
            ..Default::default()
        };
        assert!(create_payment_gateway(&config, 0.01, true).is_ok());
    }
}
