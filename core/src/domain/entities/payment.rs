//! Payment entity recorded once a gateway receipt has been verified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A verified charge attached to a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,

    /// Gateway identifier of the charge
    pub receipt_id: String,

    /// Amount charged
    pub price: f64,

    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(receipt_id: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            receipt_id: receipt_id.into(),
            price,
            created_at: Utc::now(),
        }
    }
}
