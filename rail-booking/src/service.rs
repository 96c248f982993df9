use crate::models::{BookingRules, Receipt, SectionOccupant};
use parking_lot::Mutex;
use rail_catalog::{Allocation, Occupancy, SeatAllocator, SeatingPlan, Tariff};
use rail_core::{BookingError, BookingResult, StoreError, TicketRepository, UserRepository};
use rail_shared::{Journey, Masked, PassengerDetails, Placement, Section, Ticket};
use rail_store::app_config::Config;
use rail_store::{TicketStore, UserRegistry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Orchestrates purchase, receipt, re-seat, removal and listing on top of the
/// user registry, the seat allocator and the ticket store.
///
/// A ticket is either absent, booked (possibly re-seated any number of times) or
/// removed; removal is terminal.
pub struct BookingService {
    users: Arc<dyn UserRepository>,
    tickets: Arc<dyn TicketRepository>,
    allocator: SeatAllocator,
    tariff: Tariff,
    rules: BookingRules,
    rng: Mutex<StdRng>,
}

impl BookingService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tickets: Arc<dyn TicketRepository>,
        allocator: SeatAllocator,
        tariff: Tariff,
        rules: BookingRules,
    ) -> Self {
        let rng = match rules.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            users,
            tickets,
            allocator,
            tariff,
            rules,
            rng: Mutex::new(rng),
        }
    }

    /// Service backed by a fresh in-memory store and registry
    pub fn in_memory(plan: SeatingPlan, tariff: Tariff, rules: BookingRules) -> Self {
        Self::new(
            Arc::new(UserRegistry::new()),
            Arc::new(TicketStore::new(plan)),
            SeatAllocator::default(),
            tariff,
            rules,
        )
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(UserRegistry::new()),
            Arc::new(TicketStore::new(config.seating.plan())),
            SeatAllocator::from_strategy(config.booking.seat_strategy),
            config.tariff.tariff(),
            BookingRules::from(&config.booking),
        )
    }

    /// Book a seat for the passenger and return the new ticket id.
    ///
    /// The first section is a coin flip; when it is full the other section is tried.
    /// A seat lost to a concurrent booking between allocation and commit is
    /// re-allocated, up to `commit_attempts` times.
    pub fn purchase(&self, details: &PassengerDetails, journey: &Journey) -> BookingResult<Uuid> {
        info!("Initiating ticket purchase for user: {}", Masked(details.email.as_str()));

        let user = self.users.find_or_create(details);
        let preferred = self.pick_section();

        for attempt in 1..=self.rules.commit_attempts {
            let placement = self.find_available_seat(preferred)?;
            let ticket = Ticket::new(user.id, self.price_of(placement.section), placement, journey);

            match self.tickets.book(ticket) {
                Ok(ticket) => {
                    info!("Ticket successfully purchased: {} at seat {}", ticket.id, placement);
                    return Ok(ticket.id);
                }
                Err(err) if err.is_retryable() => {
                    warn!("Purchase attempt {} lost seat {}: {}", attempt, placement, err);
                }
                Err(err) => return Err(self.internal(err)),
            }
        }

        Err(self.contention("purchase"))
    }

    pub fn get_receipt(&self, ticket_id: Uuid) -> BookingResult<Receipt> {
        info!("Retrieving receipt for ticket ID: {}", ticket_id);

        let ticket = self.load(ticket_id)?;
        let user = self.users.find_by_id(ticket.user_id).ok_or_else(|| {
            self.internal(format!("ticket {} references unknown user {}", ticket.id, ticket.user_id))
        })?;

        Ok(Receipt { ticket, user })
    }

    /// Move the ticket to another free seat, preferring its current section.
    ///
    /// When both sections are full the ticket keeps its seat and `SeatUnavailable`
    /// is returned. The switch is a compare-and-swap on the ticket's seat, so a
    /// concurrent re-seat of the same ticket forces a reload instead of leaking a seat.
    pub fn modify_seat(&self, ticket_id: Uuid) -> BookingResult<Ticket> {
        info!("Modifying seat for ticket ID: {}", ticket_id);

        for attempt in 1..=self.rules.commit_attempts {
            let ticket = self.load(ticket_id)?;
            let current = ticket.placement();
            let next = self.find_available_seat(current.section)?;

            match self.tickets.reseat(ticket_id, current, next) {
                Ok(updated) => {
                    info!("Seat modification successful for ticket ID: {} ({} -> {})", ticket_id, current, next);
                    return Ok(updated);
                }
                Err(StoreError::TicketNotFound(id)) => {
                    warn!("Ticket {} removed while re-seating", id);
                    return Err(BookingError::TicketNotFound(id));
                }
                Err(err) if err.is_retryable() => {
                    warn!("Re-seat attempt {} for ticket {} lost: {}", attempt, ticket_id, err);
                }
                Err(err) => return Err(self.internal(err)),
            }
        }

        Err(self.contention("modify seat"))
    }

    /// Delete the booking and free its seat. A second removal is `TicketNotFound`.
    pub fn remove_booking(&self, ticket_id: Uuid) -> BookingResult<Ticket> {
        info!("Removing booking for ticket ID: {}", ticket_id);

        let removed = self.tickets.delete(ticket_id).map_err(|err| {
            warn!("Removal of ticket {} failed: {}", ticket_id, err);
            BookingError::from(err)
        })?;

        info!("Successfully removed booking for ticket ID: {}", ticket_id);
        Ok(removed)
    }

    /// Passengers seated in `section`, ordered by seat number
    pub fn list_by_section(&self, section: Section) -> BookingResult<Vec<SectionOccupant>> {
        debug!("Retrieving users list for section: {}", section);

        let mut occupants = self.tickets.find_by_section(section)
            .into_iter()
            .map(|ticket| -> BookingResult<SectionOccupant> {
                let user = self.users.find_by_id(ticket.user_id).ok_or_else(|| {
                    self.internal(format!("ticket {} references unknown user {}", ticket.id, ticket.user_id))
                })?;
                Ok(SectionOccupant {
                    user_name: user.display_name(),
                    seat: ticket.seat,
                })
            })
            .collect::<BookingResult<Vec<_>>>()?;

        occupants.sort_by_key(|occupant| occupant.seat);
        Ok(occupants)
    }

    pub fn price_of(&self, section: Section) -> f64 {
        self.tariff.price_of(section)
    }

    /// Copy of a section's occupied seats
    pub fn occupancy(&self, section: Section) -> Occupancy {
        self.tickets.occupancy(section)
    }

    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    fn load(&self, ticket_id: Uuid) -> BookingResult<Ticket> {
        self.tickets.find_by_id(ticket_id).ok_or_else(|| {
            warn!("Ticket with ID {} not found", ticket_id);
            BookingError::TicketNotFound(ticket_id)
        })
    }

    fn pick_section(&self) -> Section {
        let section = if self.rng.lock().gen_bool(0.5) { Section::A } else { Section::B };
        debug!("Determined section: {}", section);
        section
    }

    /// Free seat in `preferred`, falling back to the other section
    fn find_available_seat(&self, preferred: Section) -> BookingResult<Placement> {
        for section in [preferred, preferred.other()] {
            let occupancy = self.tickets.occupancy(section);
            let allocation = {
                let mut rng = self.rng.lock();
                self.allocator.allocate(section, &occupancy, &mut *rng)
            };

            match allocation {
                Allocation::Seat(placement) => return Ok(placement),
                Allocation::Full => info!("No seats available in section: {}", section),
                Allocation::Rejected(answer) => {
                    return Err(self.internal(format!(
                        "seat selector returned {:?} for section {} outside its free pool",
                        answer, section
                    )));
                }
            }
        }

        warn!("No seats available in either section {} or {}", Section::A, Section::B);
        Err(BookingError::SeatUnavailable)
    }

    fn internal(&self, err: impl ToString) -> BookingError {
        let message = err.to_string();
        error!("Internal booking error: {}", message);
        BookingError::Internal(message)
    }

    fn contention(&self, operation: &str) -> BookingError {
        self.internal(format!(
            "{} gave up after {} lost seat races",
            operation, self.rules.commit_attempts
        ))
    }
}
