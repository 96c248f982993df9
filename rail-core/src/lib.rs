pub mod error;
pub mod repository;

pub use error::{BookingError, BookingResult, StoreError};
pub use repository::{TicketRepository, UserRepository};
