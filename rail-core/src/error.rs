use rail_shared::{SeatNumber, Section};
use uuid::Uuid;

/// Failures surfaced by the booking service
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BookingError {
    #[error("No seats available in either section {} or {}", Section::A, Section::B)]
    SeatUnavailable,
    #[error("Ticket with ID {0} not found")]
    TicketNotFound(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Internal service error: {0}")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Failures of the ticket store's atomic operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Seat {seat} in section {section} is already taken")]
    SeatTaken {
        section: Section,
        seat: SeatNumber,
    },

    #[error("Seat {seat} in section {section} is outside 1..={capacity}")]
    SeatOutOfRange {
        section: Section,
        seat: SeatNumber,
        capacity: u32,
    },

    #[error("Ticket with ID {0} not found")]
    TicketNotFound(Uuid),

    #[error("Ticket {0} was re-seated concurrently")]
    PlacementChanged(Uuid),

    #[error("Ticket {0} is booked; delete it to free its seat")]
    TicketActive(Uuid),
}

impl StoreError {
    /// Lost races that a caller may retry with a fresh allocation
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::SeatTaken { .. } | StoreError::PlacementChanged(_))
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TicketNotFound(id) => BookingError::TicketNotFound(id),
            other => BookingError::Internal(other.to_string()),
        }
    }
}
