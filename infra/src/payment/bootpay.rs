//! BootPay REST client
//!
//! Implements the `PaymentGateway` trait against the BootPay server API:
//! - `POST /request/token` exchanges the application credentials for a token
//! - `GET /receipt/{receipt_id}` looks up a charge
//! - `POST /submit` captures a verified charge
//! - `POST /cancel` refunds a charge
//!
//! Token and receipt lookups are retried with exponential backoff on
//! transport failures and 5xx answers. Capture and refund are sent once.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use stay_core::errors::PaymentError;
use stay_core::services::{AccessToken, CancelRequest, GatewayReceipt, PaymentGateway};
use stay_shared::PaymentGatewayConfig;

use super::models::{
    BootpayResponse, CancelBody, ReceiptData, SubmitRequest, TokenData, TokenRequest,
};
use crate::InfrastructureError;

/// Failure of a single gateway call
enum CallError {
    /// Worth another attempt (timeouts, connection failures, 5xx)
    Retryable(String),
    Fatal(PaymentError),
}

impl CallError {
    fn into_payment_error(self) -> PaymentError {
        match self {
            CallError::Retryable(message) => PaymentError::Gateway { message },
            CallError::Fatal(e) => e,
        }
    }
}

impl From<reqwest::Error> for CallError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() {
            CallError::Retryable(e.to_string())
        } else {
            CallError::Fatal(PaymentError::Gateway {
                message: e.to_string(),
            })
        }
    }
}

fn gateway_error(message: impl Into<String>) -> CallError {
    CallError::Fatal(PaymentError::Gateway {
        message: message.into(),
    })
}

/// BootPay payment gateway client
pub struct BootpayGateway {
    client: Client,
    config: PaymentGatewayConfig,
    price_tolerance: f64,
}

impl BootpayGateway {
    /// Create a client; fails when credentials are missing
    pub fn new(
        config: PaymentGatewayConfig,
        price_tolerance: f64,
    ) -> Result<Self, InfrastructureError> {
        if !config.has_credentials() {
            return Err(InfrastructureError::Config(
                "BootPay application_id and private_key are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            base_url = %config.base_url,
            timeout_secs = config.request_timeout_secs,
            "BootPay gateway initialized"
        );

        Ok(Self {
            client,
            config,
            price_tolerance,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn send_envelope<T: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<BootpayResponse<T>, CallError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_server_error() {
            return Err(CallError::Retryable(format!("gateway answered {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| gateway_error(format!("malformed gateway response: {}", e)))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, CallError> {
        Self::send_envelope(request)
            .await?
            .into_data()
            .map_err(gateway_error)
    }

    async fn send_unit(request: RequestBuilder) -> Result<(), CallError> {
        Self::send_envelope::<serde_json::Value>(request)
            .await?
            .into_unit()
            .map_err(gateway_error)
    }

    /// Run `call` until it succeeds, fails fatally, or attempts run out
    async fn with_retry<T, F, Fut>(&self, operation: &str, call: F) -> Result<T, PaymentError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, CallError>>,
    {
        let max_attempts = self.config.max_retries.max(1);
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match call().await {
                Ok(value) => return Ok(value),
                Err(CallError::Retryable(message)) if attempt < max_attempts => {
                    warn!(
                        operation,
                        attempt,
                        max_attempts,
                        error = %message,
                        "Gateway call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(e.into_payment_error()),
            }
        }
    }
}

#[async_trait]
impl PaymentGateway for BootpayGateway {
    async fn get_access_token(&self) -> Result<AccessToken, PaymentError> {
        let url = self.url("request/token");
        let data: TokenData = self
            .with_retry("request_token", || {
                Self::send(self.client.post(&url).json(&TokenRequest {
                    application_id: &self.config.application_id,
                    private_key: &self.config.private_key,
                }))
            })
            .await?;

        debug!(expired_at = ?data.expired_at, "Obtained gateway access token");
        Ok(AccessToken::new(data.token))
    }

    async fn verify(
        &self,
        token: &AccessToken,
        receipt_id: &str,
        expected_cost: f64,
    ) -> Result<GatewayReceipt, PaymentError> {
        let url = self.url(&format!("receipt/{}", receipt_id));
        let envelope: BootpayResponse<ReceiptData> = self
            .with_retry("verify_receipt", || {
                Self::send_envelope(self.client.get(&url).header(AUTHORIZATION, token.as_str()))
            })
            .await?;

        let receipt = envelope
            .into_data()
            .map_err(|reason| PaymentError::VerificationFailed {
                receipt_id: receipt_id.to_string(),
                reason,
            })?;

        if receipt.receipt_id != receipt_id {
            return Err(PaymentError::VerificationFailed {
                receipt_id: receipt_id.to_string(),
                reason: format!("gateway returned receipt {}", receipt.receipt_id),
            });
        }

        if receipt.is_cancelled() {
            return Err(PaymentError::VerificationFailed {
                receipt_id: receipt_id.to_string(),
                reason: "charge was cancelled".to_string(),
            });
        }

        if (receipt.price - expected_cost).abs() > self.price_tolerance {
            warn!(
                receipt_id,
                charged = receipt.price,
                expected = expected_cost,
                "Charged amount does not match the expected cost"
            );
            return Err(PaymentError::VerificationFailed {
                receipt_id: receipt_id.to_string(),
                reason: format!(
                    "charged {} but expected {}",
                    receipt.price, expected_cost
                ),
            });
        }

        Ok(GatewayReceipt {
            status: receipt.status_label(),
            receipt_id: receipt.receipt_id,
            price: receipt.price,
        })
    }

    async fn confirm(&self, token: &AccessToken, receipt_id: &str) -> Result<(), PaymentError> {
        let request = self
            .client
            .post(self.url("submit"))
            .header(AUTHORIZATION, token.as_str())
            .json(&SubmitRequest { receipt_id });

        Self::send_unit(request)
            .await
            .map_err(CallError::into_payment_error)?;

        info!(receipt_id, event = "payment_confirmed", "Gateway charge captured");
        Ok(())
    }

    async fn cancel(
        &self,
        request: &CancelRequest,
        token: &AccessToken,
    ) -> Result<(), PaymentError> {
        let receipt_id = request
            .receipt_id
            .as_deref()
            .ok_or_else(|| PaymentError::Gateway {
                message: "cancel request without receipt_id".to_string(),
            })?;

        let body = CancelBody {
            receipt_id,
            name: &request.name,
            reason: &request.reason,
            price: request.price,
        };
        let http = self
            .client
            .post(self.url("cancel"))
            .header(AUTHORIZATION, token.as_str())
            .json(&body);

        Self::send_unit(http)
            .await
            .map_err(CallError::into_payment_error)?;

        info!(
            receipt_id,
            partial = request.price.is_some(),
            event = "payment_cancelled",
            "Gateway charge refunded"
        );
        Ok(())
    }
}
