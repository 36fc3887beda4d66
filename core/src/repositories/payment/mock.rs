//! Mock implementation of PaymentRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Payment;
use crate::errors::DomainError;

use super::trait_::PaymentRepository;

/// Mock payment repository
pub struct MockPaymentRepository {
    payments: Arc<RwLock<HashMap<Uuid, Payment>>>,
}

impl MockPaymentRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            payments: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored payments
    pub async fn count(&self) -> usize {
        self.payments.read().await.len()
    }
}

impl Default for MockPaymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentRepository for MockPaymentRepository {
    async fn save(&self, payment: Payment) -> Result<Payment, DomainError> {
        let mut payments = self.payments.write().await;
        payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError> {
        let payments = self.payments.read().await;
        Ok(payments.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut payments = self.payments.write().await;
        Ok(payments.remove(&id).is_some())
    }
}
