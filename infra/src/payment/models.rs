//! BootPay REST request and response bodies

use serde::{Deserialize, Serialize};

/// Envelope wrapping every BootPay response
#[derive(Debug, Deserialize)]
pub struct BootpayResponse<T> {
    pub status: u16,
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> BootpayResponse<T> {
    fn is_success(&self) -> bool {
        self.status == 200 && self.code == 0
    }

    fn error_message(self) -> String {
        self.message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("status {} code {}", self.status, self.code))
    }

    /// Payload of a successful response, or the gateway's message
    pub fn into_data(self) -> Result<T, String> {
        if !self.is_success() {
            return Err(self.error_message());
        }
        match self.data {
            Some(data) => Ok(data),
            None => Err("response without data".to_string()),
        }
    }

    /// Success check for calls whose payload is not used
    pub fn into_unit(self) -> Result<(), String> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self.error_message())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub application_id: &'a str,
    pub private_key: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenData {
    pub token: String,
    #[serde(default)]
    pub expired_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReceiptData {
    pub receipt_id: String,
    pub price: f64,
    pub status: i32,
}

impl ReceiptData {
    pub fn status_label(&self) -> String {
        match self.status {
            0 => "pending".to_string(),
            1 => "completed".to_string(),
            2 => "confirming".to_string(),
            20 => "cancelled".to_string(),
            other => format!("status_{}", other),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == 20
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub receipt_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CancelBody<'a> {
    pub receipt_id: &'a str,
    pub name: &'a str,
    pub reason: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}
