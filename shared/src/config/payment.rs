//! Payment gateway configuration module

use serde::{Deserialize, Serialize};

/// Supported payment gateway providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    /// BootPay REST API
    #[default]
    Bootpay,
    /// In-memory gateway for development and tests
    Mock,
}

impl std::str::FromStr for PaymentProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bootpay" => Ok(PaymentProvider::Bootpay),
            "mock" => Ok(PaymentProvider::Mock),
            _ => Err(format!("Unknown payment provider: {}", s)),
        }
    }
}

/// Payment gateway credentials and transport settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentGatewayConfig {
    /// Which gateway implementation to use
    #[serde(default)]
    pub provider: PaymentProvider,

    /// Base URL of the gateway REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Application identifier issued by the gateway
    #[serde(default)]
    pub application_id: String,

    /// Private key used to request access tokens
    #[serde(default)]
    pub private_key: String,

    /// Timeout for a single gateway request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Attempts for idempotent gateway reads (token, receipt lookup)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial delay between retries in milliseconds, doubled per attempt
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for PaymentGatewayConfig {
    fn default() -> Self {
        Self {
            provider: PaymentProvider::Bootpay,
            base_url: default_base_url(),
            application_id: String::new(),
            private_key: String::new(),
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl PaymentGatewayConfig {
    /// Configuration that selects the in-memory gateway
    pub fn mock() -> Self {
        Self {
            provider: PaymentProvider::Mock,
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let provider = std::env::var("PAYMENT_PROVIDER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            provider,
            base_url: std::env::var("BOOTPAY_BASE_URL").unwrap_or_else(|_| default_base_url()),
            application_id: std::env::var("BOOTPAY_APPLICATION_ID").unwrap_or_default(),
            private_key: std::env::var("BOOTPAY_PRIVATE_KEY").unwrap_or_default(),
            request_timeout_secs: std::env::var("PAYMENT_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
            max_retries: std::env::var("PAYMENT_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_retries),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }

    /// Whether credentials for a real gateway are present
    pub fn has_credentials(&self) -> bool {
        !self.application_id.is_empty() && !self.private_key.is_empty()
    }
}

fn default_base_url() -> String {
    String::from("https://api.bootpay.co.kr")
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}
