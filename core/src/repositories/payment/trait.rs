//! Payment repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Payment;
use crate::errors::DomainError;

/// Persistence for verified payments.
///
/// A payment row is written only after the gateway verified the receipt, and
/// removed together with its reservation on cancellation.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert or update a payment
    async fn save(&self, payment: Payment) -> Result<Payment, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError>;

    /// Returns `Ok(false)` when no payment had the given id
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError>;
}
