//! MySQL implementation of the ReservationRepository trait.
//!
//! Reservations are read together with their room (inner join) and their
//! verified payment (left join). The availability-checked insert runs in a
//! SERIALIZABLE transaction that locks the room row, so concurrent requests
//! for the same room are serialized by the database.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{Connection, MySql, MySqlPool};
use stay_shared::{PaginatedResponse, Pagination};
use uuid::Uuid;

use stay_core::domain::entities::{Payment, Reservation, StayWindow};
use stay_core::errors::{DomainError, ReservationError};
use stay_core::repositories::ReservationRepository;

use super::room_repository_impl::{row_to_room, ROOM_COLUMNS};
use super::{column, db_error, parse_uuid};

/// SQLSTATE reported by InnoDB for serialization failures and deadlocks
const SERIALIZATION_FAILURE: &str = "40001";

const RESERVATION_COLUMNS: &str = r#"
    r.id, r.user_id, r.check_in, r.check_out, r.guest_num, r.total_cost,
    r.comment_id, r.comment_existed, r.created_at,
    p.id AS payment_id, p.receipt_id, p.price, p.created_at AS payment_created_at
"#;

const RESERVATION_JOINS: &str = r#"
    FROM reservations r
    JOIN rooms ro ON ro.id = r.room_id
    LEFT JOIN payments p ON p.id = r.payment_id
"#;

const INSERT_RESERVATION: &str = r#"
    INSERT INTO reservations (
        id, room_id, user_id, check_in, check_out, guest_num, total_cost,
        payment_id, comment_id, comment_existed, created_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// MySQL implementation of ReservationRepository
pub struct MySqlReservationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlReservationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// `SELECT ... FROM ... WHERE <filter> ORDER BY r.check_in, r.created_at`
    fn select(filter: &str) -> String {
        format!(
            "SELECT {}, {} {} WHERE {} ORDER BY r.check_in, r.created_at",
            RESERVATION_COLUMNS, ROOM_COLUMNS, RESERVATION_JOINS, filter
        )
    }

    fn row_to_reservation(row: &MySqlRow) -> Result<Reservation, DomainError> {
        let id: String = column(row, "id")?;
        let user_id: String = column(row, "user_id")?;
        let comment_id: Option<String> = column(row, "comment_id")?;

        Ok(Reservation {
            id: parse_uuid(&id, "reservation")?,
            room: row_to_room(row)?,
            user_id: parse_uuid(&user_id, "user")?,
            check_in: column::<NaiveDate>(row, "check_in")?,
            check_out: column::<NaiveDate>(row, "check_out")?,
            guest_num: column(row, "guest_num")?,
            total_cost: column(row, "total_cost")?,
            payment: Self::row_to_payment(row)?,
            comment_id: comment_id
                .as_deref()
                .map(|id| parse_uuid(id, "comment"))
                .transpose()?,
            comment_existed: column(row, "comment_existed")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    fn row_to_payment(row: &MySqlRow) -> Result<Option<Payment>, DomainError> {
        let payment_id: Option<String> = column(row, "payment_id")?;
        let Some(payment_id) = payment_id else {
            return Ok(None);
        };

        Ok(Some(Payment {
            id: parse_uuid(&payment_id, "payment")?,
            receipt_id: column(row, "receipt_id")?,
            price: column(row, "price")?,
            created_at: column::<DateTime<Utc>>(row, "payment_created_at")?,
        }))
    }

    fn bind_reservation<'q>(
        query: Query<'q, MySql, MySqlArguments>,
        reservation: &Reservation,
    ) -> Query<'q, MySql, MySqlArguments> {
        query
            .bind(reservation.id.to_string())
            .bind(reservation.room_id().to_string())
            .bind(reservation.user_id.to_string())
            .bind(reservation.check_in)
            .bind(reservation.check_out)
            .bind(reservation.guest_num)
            .bind(reservation.total_cost)
            .bind(reservation.payment.as_ref().map(|p| p.id.to_string()))
            .bind(reservation.comment_id.map(|id| id.to_string()))
            .bind(reservation.comment_existed)
            .bind(reservation.created_at)
    }

    async fn fetch_many(
        &self,
        query: Query<'_, MySql, MySqlArguments>,
        action: &str,
    ) -> Result<Vec<Reservation>, DomainError> {
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(action, e))?;

        rows.iter().map(Self::row_to_reservation).collect()
    }

    async fn fetch_one(
        &self,
        query: Query<'_, MySql, MySqlArguments>,
        action: &str,
    ) -> Result<Option<Reservation>, DomainError> {
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error(action, e))?;

        row.as_ref().map(Self::row_to_reservation).transpose()
    }
}

/// Serialization failures mean a concurrent booking won the room lock
fn map_insert_error(room_id: Uuid, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(SERIALIZATION_FAILURE) {
            tracing::warn!(
                room_id = %room_id,
                error = %db,
                "Reservation insert lost a serialization race"
            );
            return ReservationError::ReservationConflict {
                room_id,
                conflicting_id: Uuid::nil(),
            }
            .into();
        }
    }
    db_error("insert reservation", e)
}

#[async_trait]
impl ReservationRepository for MySqlReservationRepository {
    async fn save(&self, reservation: Reservation) -> Result<Reservation, DomainError> {
        let query = format!(
            "{} ON DUPLICATE KEY UPDATE
                check_in = VALUES(check_in),
                check_out = VALUES(check_out),
                guest_num = VALUES(guest_num),
                total_cost = VALUES(total_cost),
                payment_id = VALUES(payment_id),
                comment_id = VALUES(comment_id),
                comment_existed = VALUES(comment_existed)",
            INSERT_RESERVATION
        );

        Self::bind_reservation(sqlx::query(&query), &reservation)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("save reservation", e))?;

        Ok(reservation)
    }

    async fn insert_if_available(
        &self,
        reservation: Reservation,
    ) -> Result<Reservation, DomainError> {
        let room_id = reservation.room_id();
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| db_error("acquire connection", e))?;

        // Applies to the next transaction on this connection only
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *conn)
            .await
            .map_err(|e| db_error("set isolation level", e))?;

        let mut tx = conn
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        let room = sqlx::query("SELECT id FROM rooms WHERE id = ? FOR UPDATE")
            .bind(room_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_insert_error(room_id, e))?;

        if room.is_none() {
            return Err(DomainError::NotFound {
                resource: format!("Room {}", room_id),
            });
        }

        let conflict = sqlx::query(
            r#"
            SELECT id FROM reservations
            WHERE room_id = ? AND check_in < ? AND ? < check_out
            ORDER BY check_in
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(room_id.to_string())
        .bind(reservation.check_out)
        .bind(reservation.check_in)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_insert_error(room_id, e))?;

        if let Some(row) = conflict {
            let id: String = column(&row, "id")?;
            return Err(ReservationError::ReservationConflict {
                room_id,
                conflicting_id: parse_uuid(&id, "reservation")?,
            }
            .into());
        }

        Self::bind_reservation(sqlx::query(INSERT_RESERVATION), &reservation)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_insert_error(room_id, e))?;

        tx.commit()
            .await
            .map_err(|e| map_insert_error(room_id, e))?;

        tracing::debug!(
            reservation_id = %reservation.id,
            room_id = %room_id,
            "Reservation inserted"
        );

        Ok(reservation)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, DomainError> {
        let query = Self::select("r.id = ?");
        self.fetch_one(sqlx::query(&query).bind(id.to_string()), "find reservation")
            .await
    }

    async fn find_by_room_id(&self, room_id: Uuid) -> Result<Vec<Reservation>, DomainError> {
        let query = Self::select("r.room_id = ?");
        self.fetch_many(
            sqlx::query(&query).bind(room_id.to_string()),
            "find reservations by room",
        )
        .await
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Reservation>, DomainError> {
        let query = Self::select("r.user_id = ?");
        self.fetch_many(
            sqlx::query(&query).bind(user_id.to_string()),
            "find reservations by user",
        )
        .await
    }

    async fn find_by_user_paged(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> Result<PaginatedResponse<Reservation>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count reservations", e))?;

        let query = format!("{} LIMIT ? OFFSET ?", Self::select("r.user_id = ?"));
        let data = self
            .fetch_many(
                sqlx::query(&query)
                    .bind(user_id.to_string())
                    .bind(pagination.limit_i64())
                    .bind(pagination.offset_i64()),
                "page reservations by user",
            )
            .await?;

        Ok(PaginatedResponse::new(data, pagination, total.max(0) as u64))
    }

    async fn find_by_date_range_and_room(
        &self,
        room_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Reservation>, DomainError> {
        let query = Self::select("r.room_id = ? AND r.check_in BETWEEN ? AND ?");
        self.fetch_many(
            sqlx::query(&query)
                .bind(room_id.to_string())
                .bind(start)
                .bind(end),
            "find reservations by date range",
        )
        .await
    }

    async fn find_overlapping(
        &self,
        room_id: Uuid,
        window: StayWindow,
    ) -> Result<Vec<Reservation>, DomainError> {
        let query = Self::select("r.room_id = ? AND r.check_in < ? AND ? < r.check_out");
        self.fetch_many(
            sqlx::query(&query)
                .bind(room_id.to_string())
                .bind(window.check_out)
                .bind(window.check_in),
            "find overlapping reservations",
        )
        .await
    }

    async fn find_by_host_with_payment(
        &self,
        host_id: Uuid,
    ) -> Result<Vec<Reservation>, DomainError> {
        let query = Self::select("ro.host_id = ? AND p.id IS NOT NULL");
        self.fetch_many(
            sqlx::query(&query).bind(host_id.to_string()),
            "find paid reservations by host",
        )
        .await
    }

    async fn find_by_room_from(
        &self,
        room_id: Uuid,
        from: NaiveDate,
    ) -> Result<Vec<Reservation>, DomainError> {
        let query = Self::select("r.room_id = ? AND r.check_out >= ?");
        self.fetch_many(
            sqlx::query(&query).bind(room_id.to_string()).bind(from),
            "find upcoming reservations",
        )
        .await
    }

    async fn find_by_receipt_id(
        &self,
        receipt_id: &str,
    ) -> Result<Option<Reservation>, DomainError> {
        let query = Self::select("p.receipt_id = ?");
        self.fetch_one(
            sqlx::query(&query).bind(receipt_id.to_string()),
            "find reservation by receipt",
        )
        .await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete reservation", e))?;

        Ok(result.rows_affected() > 0)
    }
}
