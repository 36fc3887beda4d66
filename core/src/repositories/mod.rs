pub mod payment;
pub mod reservation;
pub mod room;

pub use payment::{MockPaymentRepository, PaymentRepository};
pub use reservation::{MockReservationRepository, ReservationRepository};
pub use room::{MockRoomRepository, RoomRepository};
