//! MySQL repository implementations

pub mod payment_repository_impl;
pub mod reservation_repository_impl;
pub mod room_repository_impl;

pub use payment_repository_impl::MySqlPaymentRepository;
pub use reservation_repository_impl::MySqlReservationRepository;
pub use room_repository_impl::MySqlRoomRepository;

use sqlx::mysql::MySqlRow;
use sqlx::Row;
use uuid::Uuid;

use stay_core::errors::DomainError;

/// Read a named column, reporting decode failures as internal errors
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

/// Parse a CHAR(36) identifier
pub(crate) fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid {} UUID: {}", what, e),
    })
}

pub(crate) fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to {}: {}", action, e),
    }
}
