//! Domain entities representing core business objects.

pub mod comment;
pub mod payment;
pub mod reservation;
pub mod room;
pub mod user;

// Re-export commonly used types
pub use comment::Comment;
pub use payment::Payment;
pub use reservation::{Reservation, StayStatus, StayWindow};
pub use room::{Location, Room};
pub use user::User;
