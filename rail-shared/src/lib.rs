pub mod models;
pub mod pii;

pub use models::{normalize_email, Journey, PassengerDetails, Placement, SeatNumber, Section, Ticket, User};
pub use pii::Masked;
