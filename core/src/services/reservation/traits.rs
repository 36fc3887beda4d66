//! Payment gateway integration

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::PaymentError;

use super::types::CancelRequest;

/// Short-lived credential issued by the payment gateway
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Charge details as reported by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayReceipt {
    pub receipt_id: String,
    pub price: f64,
    /// Gateway-specific status label
    pub status: String,
}

/// Trait for payment gateway integration
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Obtain an access token for subsequent calls
    async fn get_access_token(&self) -> Result<AccessToken, PaymentError>;

    /// Look up a receipt and check that its charged amount equals `expected_cost`.
    /// Returns `PaymentError::VerificationFailed` on mismatch or unknown receipt.
    async fn verify(
        &self,
        token: &AccessToken,
        receipt_id: &str,
        expected_cost: f64,
    ) -> Result<GatewayReceipt, PaymentError>;

    /// Capture a verified charge
    async fn confirm(&self, token: &AccessToken, receipt_id: &str) -> Result<(), PaymentError>;

    /// Refund a charge; `request.receipt_id` must be set
    async fn cancel(&self, request: &CancelRequest, token: &AccessToken)
        -> Result<(), PaymentError>;
}
