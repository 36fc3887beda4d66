//! In-memory payment gateway for development and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use stay_core::errors::PaymentError;
use stay_core::services::{AccessToken, CancelRequest, GatewayReceipt, PaymentGateway};

/// Gateway that knows the receipts registered on it.
///
/// Receipts start as `"completed"`, move to `"confirmed"` on capture and
/// `"cancelled"` on refund. Each call can be switched to fail.
#[derive(Clone)]
pub struct MockPaymentGateway {
    receipts: Arc<RwLock<HashMap<String, GatewayReceipt>>>,
    refunds: Arc<RwLock<Vec<CancelRequest>>>,
    price_tolerance: f64,
    fail_token: Arc<AtomicBool>,
    fail_confirm: Arc<AtomicBool>,
    fail_cancel: Arc<AtomicBool>,
}

impl MockPaymentGateway {
    pub fn new(price_tolerance: f64) -> Self {
        Self {
            receipts: Arc::new(RwLock::new(HashMap::new())),
            refunds: Arc::new(RwLock::new(Vec::new())),
            price_tolerance,
            fail_token: Arc::new(AtomicBool::new(false)),
            fail_confirm: Arc::new(AtomicBool::new(false)),
            fail_cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register a charge the gateway will report
    pub async fn register_receipt(&self, receipt_id: impl Into<String>, price: f64) {
        let receipt_id = receipt_id.into();
        self.receipts.write().await.insert(
            receipt_id.clone(),
            GatewayReceipt {
                receipt_id,
                price,
                status: "completed".to_string(),
            },
        );
    }

    pub async fn receipt(&self, receipt_id: &str) -> Option<GatewayReceipt> {
        self.receipts.read().await.get(receipt_id).cloned()
    }

    /// Refund requests received so far
    pub async fn refunds(&self) -> Vec<CancelRequest> {
        self.refunds.read().await.clone()
    }

    pub fn set_fail_token(&self, fail: bool) {
        self.fail_token.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_confirm(&self, fail: bool) {
        self.fail_confirm.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_cancel(&self, fail: bool) {
        self.fail_cancel.store(fail, Ordering::SeqCst);
    }

    fn unavailable(operation: &str) -> PaymentError {
        PaymentError::Gateway {
            message: format!("mock gateway {} unavailable", operation),
        }
    }

    async fn set_status(&self, receipt_id: &str, status: &str) -> Result<(), PaymentError> {
        let mut receipts = self.receipts.write().await;
        let receipt = receipts
            .get_mut(receipt_id)
            .ok_or_else(|| PaymentError::Gateway {
                message: format!("unknown receipt {}", receipt_id),
            })?;
        receipt.status = status.to_string();
        Ok(())
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new(stay_shared::config::booking::DEFAULT_PRICE_TOLERANCE)
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn get_access_token(&self) -> Result<AccessToken, PaymentError> {
        if self.fail_token.load(Ordering::SeqCst) {
            return Err(Self::unavailable("token"));
        }
        Ok(AccessToken::new(format!("mock-{}", uuid::Uuid::new_v4())))
    }

    async fn verify(
        &self,
        _token: &AccessToken,
        receipt_id: &str,
        expected_cost: f64,
    ) -> Result<GatewayReceipt, PaymentError> {
        let receipt = self
            .receipt(receipt_id)
            .await
            .ok_or_else(|| PaymentError::VerificationFailed {
                receipt_id: receipt_id.to_string(),
                reason: "unknown receipt".to_string(),
            })?;

        if receipt.status == "cancelled" {
            return Err(PaymentError::VerificationFailed {
                receipt_id: receipt_id.to_string(),
                reason: "charge was cancelled".to_string(),
            });
        }

        if (receipt.price - expected_cost).abs() > self.price_tolerance {
            return Err(PaymentError::VerificationFailed {
                receipt_id: receipt_id.to_string(),
                reason: format!("charged {} but expected {}", receipt.price, expected_cost),
            });
        }

        Ok(receipt)
    }

    async fn confirm(&self, _token: &AccessToken, receipt_id: &str) -> Result<(), PaymentError> {
        if self.fail_confirm.load(Ordering::SeqCst) {
            return Err(Self::unavailable("confirm"));
        }
        self.set_status(receipt_id, "confirmed").await?;
        info!(receipt_id, "Mock gateway captured charge");
        Ok(())
    }

    async fn cancel(
        &self,
        request: &CancelRequest,
        _token: &AccessToken,
    ) -> Result<(), PaymentError> {
        if self.fail_cancel.load(Ordering::SeqCst) {
            return Err(Self::unavailable("cancel"));
        }
        let receipt_id = request
            .receipt_id
            .as_deref()
            .ok_or_else(|| PaymentError::Gateway {
                message: "cancel request without receipt_id".to_string(),
            })?;

        self.set_status(receipt_id, "cancelled").await?;
        self.refunds.write().await.push(request.clone());
        info!(receipt_id, reason = %request.reason, "Mock gateway refunded charge");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_verify_checks_amount() {
        let gateway = MockPaymentGateway::default();
        gateway.register_receipt("r-1", 580.0).await;
        let token = gateway.get_access_token().await.unwrap();

        assert!(gateway.verify(&token, "r-1", 580.0).await.is_ok());
        assert!(matches!(
            gateway.verify(&token, "r-1", 600.0).await,
            Err(PaymentError::VerificationFailed { .. })
        ));
        assert!(matches!(
            gateway.verify(&token, "missing", 580.0).await,
            Err(PaymentError::VerificationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_confirm_then_cancel_updates_status() {
        let gateway = MockPaymentGateway::default();
        gateway.register_receipt("r-2", 100.0).await;
        let token = gateway.get_access_token().await.unwrap();

        gateway.confirm(&token, "r-2").await.unwrap();
        assert_eq!(gateway.receipt("r-2").await.unwrap().status, "confirmed");

        let request = CancelRequest::new("guest", "plans changed").with_receipt_id("r-2");
        gateway.cancel(&request, &token).await.unwrap();
        assert_eq!(gateway.receipt("r-2").await.unwrap().status, "cancelled");
        assert_eq!(gateway.refunds().await.len(), 1);

        // A refunded charge no longer verifies
        assert!(gateway.verify(&token, "r-2", 100.0).await.is_err());
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let gateway = MockPaymentGateway::default();
        gateway.register_receipt("r-3", 10.0).await;

        gateway.set_fail_token(true);
        assert!(gateway.get_access_token().await.is_err());
        gateway.set_fail_token(false);

        let token = gateway.get_access_token().await.unwrap();
        gateway.set_fail_confirm(true);
        assert!(matches!(
            gateway.confirm(&token, "r-3").await,
            Err(PaymentError::Gateway { .. })
        ));
    }
}
