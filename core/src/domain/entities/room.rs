//! Room and location entities.
//!
//! Rooms are owned by the listing side of the system; the reservation core only
//! reads them, and every reservation carries a snapshot of the room it books.

use serde::{Deserialize, Serialize};
use stay_shared::Coordinate;
use uuid::Uuid;

/// Postal location of a room
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub city: String,
    pub borough: String,
    pub neighborhood: String,
    pub detail_address: String,
    pub coordinate: Coordinate,
}

impl Location {
    /// Address parts joined with single spaces, skipping empty parts
    pub fn full_address(&self) -> String {
        [
            self.country.as_str(),
            self.city.as_str(),
            self.borough.as_str(),
            self.neighborhood.as_str(),
            self.detail_address.as_str(),
        ]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// A bookable unit listed by a host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier for the room
    pub id: Uuid,

    /// Owning host
    pub host_id: Uuid,

    /// Listing title
    pub name: String,

    /// Price per night
    pub room_cost: f64,

    /// One-off cleaning fee
    pub cleaning_cost: f64,

    /// One-off tax
    pub tax: f64,

    pub location: Location,

    pub bed_num: u32,
    pub bedroom_num: u32,
    pub bathroom_num: u32,

    /// Maximum number of guests
    pub people_limit: u32,

    pub is_parking: bool,
    pub is_smoking: bool,
}

impl Room {
    /// Creates a room with one bed, bedroom and bathroom for two guests
    pub fn new(
        host_id: Uuid,
        name: impl Into<String>,
        room_cost: f64,
        cleaning_cost: f64,
        tax: f64,
        location: Location,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            host_id,
            name: name.into(),
            room_cost,
            cleaning_cost,
            tax,
            location,
            bed_num: 1,
            bedroom_num: 1,
            bathroom_num: 1,
            people_limit: 2,
            is_parking: false,
            is_smoking: false,
        }
    }

    /// Sets the maximum number of guests
    pub fn with_people_limit(mut self, limit: u32) -> Self {
        self.people_limit = limit;
        self
    }

    /// Total price of a stay: one-off tax and cleaning plus the nightly cost
    /// multiplied by the service fee rate
    pub fn stay_cost(&self, nights: i64, service_fee_rate: f64) -> f64 {
        self.tax + self.cleaning_cost + self.room_cost * service_fee_rate * nights as f64
    }

    /// Whether the room is listed by the given host
    pub fn is_hosted_by(&self, host_id: Uuid) -> bool {
        self.host_id == host_id
    }
}
