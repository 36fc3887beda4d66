//! Read-only access to room listings.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Room;
use crate::errors::DomainError;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, DomainError>;

    /// Rooms listed by the host
    async fn find_by_host(&self, host_id: Uuid) -> Result<Vec<Room>, DomainError>;
}
