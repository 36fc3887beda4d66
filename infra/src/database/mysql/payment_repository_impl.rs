//! MySQL implementation of the PaymentRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use stay_core::domain::entities::Payment;
use stay_core::errors::DomainError;
use stay_core::repositories::PaymentRepository;

use super::{column, db_error, parse_uuid};

/// MySQL implementation of PaymentRepository
pub struct MySqlPaymentRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlPaymentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_payment(row: &MySqlRow) -> Result<Payment, DomainError> {
        let id: String = column(row, "id")?;
        Ok(Payment {
            id: parse_uuid(&id, "payment")?,
            receipt_id: column(row, "receipt_id")?,
            price: column(row, "price")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }
}

#[async_trait]
impl PaymentRepository for MySqlPaymentRepository {
    async fn save(&self, payment: Payment) -> Result<Payment, DomainError> {
        let query = r#"
            INSERT INTO payments (id, receipt_id, price, created_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                receipt_id = VALUES(receipt_id),
                price = VALUES(price)
        "#;

        sqlx::query(query)
            .bind(payment.id.to_string())
            .bind(&payment.receipt_id)
            .bind(payment.price)
            .bind(payment.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("save payment", e))?;

        tracing::debug!(
            payment_id = %payment.id,
            receipt_id = %payment.receipt_id,
            "Payment stored"
        );

        Ok(payment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, DomainError> {
        let query = r#"
            SELECT id, receipt_id, price, created_at
            FROM payments
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find payment", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_payment(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete payment", e))?;

        Ok(result.rows_affected() > 0)
    }
}
