pub mod section;
pub mod ticket;
pub mod user;

pub use section::{Placement, SeatNumber, Section};
pub use ticket::{Journey, Ticket};
pub use user::{normalize_email, PassengerDetails, User};
