//! Mock implementation of RoomRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Room;
use crate::errors::DomainError;

use super::trait_::RoomRepository;

/// Mock room repository. Rooms are seeded through [`MockRoomRepository::insert`]
/// since the trait itself is read-only.
pub struct MockRoomRepository {
    rooms: Arc<RwLock<HashMap<Uuid, Room>>>,
}

impl MockRoomRepository {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn insert(&self, room: Room) -> Room {
        let mut rooms = self.rooms.write().await;
        rooms.insert(room.id, room.clone());
        room
    }
}

impl Default for MockRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for MockRoomRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, DomainError> {
        let rooms = self.rooms.read().await;
        Ok(rooms.get(&id).cloned())
    }

    async fn find_by_host(&self, host_id: Uuid) -> Result<Vec<Room>, DomainError> {
        let rooms = self.rooms.read().await;
        let mut found: Vec<Room> = rooms
            .values()
            .filter(|r| r.is_hosted_by(host_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}
