use rail_catalog::Occupancy;
use rail_shared::{PassengerDetails, Placement, Section, Ticket, User};
use uuid::Uuid;
use crate::error::StoreError;

/// Authoritative owner of tickets and of each section's occupied seats.
///
/// Every method is atomic with respect to every other method on the same store.
pub trait TicketRepository: Send + Sync {
    /// Insert or overwrite a ticket record. Does not reserve its seat.
    fn save(&self, ticket: Ticket) -> Ticket;

    /// Reserve `placement` for `ticket_id`; fails with `SeatTaken` if someone holds it.
    /// A stored record for `ticket_id` moves to `placement` in the same step.
    fn assign_seat(&self, ticket_id: Uuid, placement: Placement) -> Result<(), StoreError>;

    /// Free whatever seat `ticket_id` holds. Returns the released seat, if any.
    /// Refused with `TicketActive` while a record for the id is stored.
    fn release_seat(&self, ticket_id: Uuid) -> Result<Option<Placement>, StoreError>;

    /// Reserve the ticket's seat and store the record in one step.
    fn book(&self, ticket: Ticket) -> Result<Ticket, StoreError>;

    /// Move a ticket from `expected` to `next`, provided it still sits at `expected`.
    fn reseat(&self, ticket_id: Uuid, expected: Placement, next: Placement) -> Result<Ticket, StoreError>;

    fn find_by_id(&self, ticket_id: Uuid) -> Option<Ticket>;

    /// Snapshot of the tickets seated in `section`
    fn find_by_section(&self, section: Section) -> Vec<Ticket>;

    /// Copy of the section's occupancy
    fn occupancy(&self, section: Section) -> Occupancy;

    /// Remove a ticket and free its seat
    fn delete(&self, ticket_id: Uuid) -> Result<Ticket, StoreError>;
}

/// Find-or-create registry of passengers keyed by email
pub trait UserRepository: Send + Sync {
    /// Existing user for the email, or a freshly created one. At most one user per email.
    fn find_or_create(&self, details: &PassengerDetails) -> User;

    fn find_by_id(&self, user_id: Uuid) -> Option<User>;

    fn find_by_email(&self, email: &str) -> Option<User>;

    fn count(&self) -> usize;
}
