//! User entity representing a registered guest or host in the StayHub system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity. Hosts are ordinary users that own rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Profile image location
    pub image_url: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            image_url: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the profile image
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_creation() {
        let user = User::new("Kim", "kim@example.com").with_image_url("https://cdn/kim.png");

        assert_eq!(user.name, "Kim");
        assert_eq!(user.email, "kim@example.com");
        assert_eq!(user.image_url.as_deref(), Some("https://cdn/kim.png"));
    }

    #[test]
    fn test_users_get_distinct_ids() {
        assert_ne!(User::new("a", "a@x").id, User::new("b", "b@x").id);
    }
}
