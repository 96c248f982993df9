use parking_lot::RwLock;
use rail_catalog::{InventoryError, Occupancy, SeatingPlan};
use rail_core::{StoreError, TicketRepository};
use rail_shared::{Placement, Section, Ticket};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// In-memory ticket table plus per-section occupancy behind a single lock.
///
/// Readers share the lock, so a query never sees a ticket whose seat is missing from
/// the occupancy (or the reverse).
pub struct TicketStore {
    state: RwLock<StoreState>,
}

struct StoreState {
    tickets: HashMap<Uuid, Ticket>,
    /// Seat currently held by each ticket id
    seats: HashMap<Uuid, Placement>,
    section_a: Occupancy,
    section_b: Occupancy,
}

impl StoreState {
    fn occupancy(&self, section: Section) -> &Occupancy {
        match section {
            Section::A => &self.section_a,
            Section::B => &self.section_b,
        }
    }

    fn occupancy_mut(&mut self, section: Section) -> &mut Occupancy {
        match section {
            Section::A => &mut self.section_a,
            Section::B => &mut self.section_b,
        }
    }

    fn reserve(&mut self, placement: Placement) -> Result<(), StoreError> {
        self.occupancy_mut(placement.section)
            .reserve(placement.seat)
            .map_err(|err| match err {
                InventoryError::AlreadyOccupied(seat) => StoreError::SeatTaken {
                    section: placement.section,
                    seat,
                },
                InventoryError::OutOfRange { seat, capacity } => StoreError::SeatOutOfRange {
                    section: placement.section,
                    seat,
                    capacity,
                },
            })
    }

    /// A ticket holds at most one seat: taking a new one frees the previous one.
    fn assign(&mut self, ticket_id: Uuid, placement: Placement) -> Result<(), StoreError> {
        let previous = self.seats.get(&ticket_id).copied();
        if previous == Some(placement) {
            return Ok(());
        }

        self.reserve(placement)?;
        if let Some(previous) = previous {
            self.occupancy_mut(previous.section).release(previous.seat);
        }
        self.seats.insert(ticket_id, placement);
        Ok(())
    }

    fn release(&mut self, ticket_id: Uuid) -> Option<Placement> {
        let placement = self.seats.remove(&ticket_id)?;
        self.occupancy_mut(placement.section).release(placement.seat);
        Some(placement)
    }
}

impl TicketStore {
    pub fn new(plan: SeatingPlan) -> Self {
        Self {
            state: RwLock::new(StoreState {
                tickets: HashMap::new(),
                seats: HashMap::new(),
                section_a: Occupancy::new(plan.capacity(Section::A)),
                section_b: Occupancy::new(plan.capacity(Section::B)),
            }),
        }
    }

    /// Number of stored tickets
    pub fn len(&self) -> usize {
        self.state.read().tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seat held by a ticket id, including ids whose record has not been saved yet
    pub fn seat_of(&self, ticket_id: Uuid) -> Option<Placement> {
        self.state.read().seats.get(&ticket_id).copied()
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new(SeatingPlan::default())
    }
}

impl TicketRepository for TicketStore {
    fn save(&self, ticket: Ticket) -> Ticket {
        let mut state = self.state.write();
        state.tickets.insert(ticket.id, ticket.clone());
        ticket
    }

    fn assign_seat(&self, ticket_id: Uuid, placement: Placement) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.assign(ticket_id, placement).inspect_err(|err| {
            debug!("Seat assignment for ticket {} refused: {}", ticket_id, err);
        })?;

        // Keep a stored record on the seat it now holds
        if let Some(ticket) = state.tickets.get_mut(&ticket_id) {
            if ticket.placement() != placement {
                debug!("Ticket {} moved from seat {} to {}", ticket_id, ticket.placement(), placement);
                ticket.reseat(placement);
            }
        }
        Ok(())
    }

    fn release_seat(&self, ticket_id: Uuid) -> Result<Option<Placement>, StoreError> {
        let mut state = self.state.write();
        if state.tickets.contains_key(&ticket_id) {
            return Err(StoreError::TicketActive(ticket_id));
        }

        let released = state.release(ticket_id);
        if let Some(placement) = released {
            debug!("Released seat {} held by ticket {}", placement, ticket_id);
        }
        Ok(released)
    }

    fn book(&self, ticket: Ticket) -> Result<Ticket, StoreError> {
        let mut state = self.state.write();
        state.assign(ticket.id, ticket.placement())?;
        state.tickets.insert(ticket.id, ticket.clone());

        info!("Ticket {} booked at seat {}", ticket.id, ticket.placement());
        Ok(ticket)
    }

    fn reseat(&self, ticket_id: Uuid, expected: Placement, next: Placement) -> Result<Ticket, StoreError> {
        let mut state = self.state.write();

        let current = state.tickets.get(&ticket_id)
            .map(|ticket| ticket.placement())
            .ok_or(StoreError::TicketNotFound(ticket_id))?;
        if current != expected {
            return Err(StoreError::PlacementChanged(ticket_id));
        }

        // The new seat is reserved before the old one is freed
        state.assign(ticket_id, next)?;

        let ticket = state.tickets.get_mut(&ticket_id)
            .ok_or(StoreError::TicketNotFound(ticket_id))?;
        ticket.reseat(next);
        let ticket = ticket.clone();

        info!("Ticket {} moved from seat {} to {}", ticket_id, expected, next);
        Ok(ticket)
    }

    fn find_by_id(&self, ticket_id: Uuid) -> Option<Ticket> {
        self.state.read().tickets.get(&ticket_id).cloned()
    }

    fn find_by_section(&self, section: Section) -> Vec<Ticket> {
        self.state.read().tickets.values()
            .filter(|ticket| ticket.section == section)
            .cloned()
            .collect()
    }

    fn occupancy(&self, section: Section) -> Occupancy {
        self.state.read().occupancy(section).clone()
    }

    fn delete(&self, ticket_id: Uuid) -> Result<Ticket, StoreError> {
        let mut state = self.state.write();
        let ticket = state.tickets.remove(&ticket_id)
            .ok_or(StoreError::TicketNotFound(ticket_id))?;
        state.release(ticket_id);

        info!("Ticket {} deleted, seat {} released", ticket_id, ticket.placement());
        Ok(ticket)
    }
}
