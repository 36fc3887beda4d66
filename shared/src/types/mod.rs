//! Type definitions module with domain-specific sub-modules
//!
//! This module organizes types into logical categories:
//! - `common` - The id alias and the listing coordinate type
//! - `pagination` - Pagination for list queries

pub mod common;
pub mod pagination;

// Re-export commonly used types at module level
pub use common::{Coordinate, Uuid};
pub use pagination::{PaginatedResponse, Pagination};
