//! MySQL implementation of the RoomRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use stay_core::domain::entities::{Location, Room};
use stay_core::errors::DomainError;
use stay_core::repositories::RoomRepository;
use stay_shared::Coordinate;

use super::{column, parse_uuid};

/// Room columns selected from the `ro` alias, with id and name renamed
pub(crate) const ROOM_COLUMNS: &str = r#"
    ro.id AS room_id, ro.host_id, ro.name AS room_name, ro.room_cost, ro.cleaning_cost,
    ro.tax, ro.country, ro.city, ro.borough, ro.neighborhood, ro.detail_address,
    ro.latitude, ro.longitude, ro.bed_num, ro.bedroom_num, ro.bathroom_num,
    ro.people_limit, ro.is_parking, ro.is_smoking
"#;

/// MySQL implementation of RoomRepository
pub struct MySqlRoomRepository {
    pool: MySqlPool,
}

impl MySqlRoomRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Map the aliased room columns of a row into a `Room`
pub(crate) fn row_to_room(row: &MySqlRow) -> Result<Room, DomainError> {
    let id: String = column(row, "room_id")?;
    let host_id: String = column(row, "host_id")?;

    Ok(Room {
        id: parse_uuid(&id, "room")?,
        host_id: parse_uuid(&host_id, "host")?,
        name: column(row, "room_name")?,
        room_cost: column(row, "room_cost")?,
        cleaning_cost: column(row, "cleaning_cost")?,
        tax: column(row, "tax")?,
        location: Location {
            country: column(row, "country")?,
            city: column(row, "city")?,
            borough: column(row, "borough")?,
            neighborhood: column(row, "neighborhood")?,
            detail_address: column(row, "detail_address")?,
            coordinate: Coordinate::new(column(row, "latitude")?, column(row, "longitude")?),
        },
        bed_num: column(row, "bed_num")?,
        bedroom_num: column(row, "bedroom_num")?,
        bathroom_num: column(row, "bathroom_num")?,
        people_limit: column(row, "people_limit")?,
        is_parking: column(row, "is_parking")?,
        is_smoking: column(row, "is_smoking")?,
    })
}

#[async_trait]
impl RoomRepository for MySqlRoomRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, DomainError> {
        let query = format!("SELECT {} FROM rooms ro WHERE ro.id = ? LIMIT 1", ROOM_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find room: {}", e),
            })?;

        result.as_ref().map(row_to_room).transpose()
    }

    async fn find_by_host(&self, host_id: Uuid) -> Result<Vec<Room>, DomainError> {
        let query = format!(
            "SELECT {} FROM rooms ro WHERE ro.host_id = ? ORDER BY ro.name",
            ROOM_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(host_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find rooms by host: {}", e),
            })?;

        rows.iter().map(row_to_room).collect()
    }
}
