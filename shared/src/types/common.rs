//! Common type definitions

use serde::{Deserialize, Serialize};

/// UUID v4 type alias for consistency
pub type Uuid = uuid::Uuid;

/// Coordinate of a listing's address
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}
