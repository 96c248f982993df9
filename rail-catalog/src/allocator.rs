use crate::inventory::Occupancy;
use rail_shared::{Placement, SeatNumber, Section};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

/// Outcome of a seat allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    Seat(Placement),
    Full,
    /// The selector answered with something outside the free pool (`None` while
    /// seats remain, an occupied seat, or an out-of-range one)
    Rejected(Option<SeatNumber>),
}

/// Which built-in selector picks seats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStrategy {
    #[default]
    Random,
    LowestFree,
}

/// Picks one seat from the free pool of a section.
///
/// Implementations only read the occupancy they are given; committing the seat is the
/// store's job.
pub trait SeatSelector: Send + Sync {
    /// Return a free seat, or `None` when the section has none left.
    fn select(&self, occupancy: &Occupancy, rng: &mut dyn RngCore) -> Option<SeatNumber>;
}

/// Uniformly random choice among the free seats
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSeatSelector;

impl SeatSelector for RandomSeatSelector {
    fn select(&self, occupancy: &Occupancy, rng: &mut dyn RngCore) -> Option<SeatNumber> {
        let free = occupancy.free_seats();
        if free.is_empty() {
            return None;
        }
        Some(free[rng.gen_range(0..free.len())])
    }
}

/// Always the lowest free seat number
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestFreeSeatSelector;

impl SeatSelector for LowestFreeSeatSelector {
    fn select(&self, occupancy: &Occupancy, _rng: &mut dyn RngCore) -> Option<SeatNumber> {
        occupancy.free_seats().iter().min().copied()
    }
}

/// Turns a section's occupancy into a seat suggestion
#[derive(Clone)]
pub struct SeatAllocator {
    selector: Arc<dyn SeatSelector>,
}

impl SeatAllocator {
    pub fn new(selector: Arc<dyn SeatSelector>) -> Self {
        Self { selector }
    }

    pub fn from_strategy(strategy: SeatStrategy) -> Self {
        match strategy {
            SeatStrategy::Random => Self::new(Arc::new(RandomSeatSelector)),
            SeatStrategy::LowestFree => Self::new(Arc::new(LowestFreeSeatSelector)),
        }
    }

    pub fn allocate(&self, section: Section, occupancy: &Occupancy, rng: &mut dyn RngCore) -> Allocation {
        if occupancy.is_full() {
            debug!("Section {} is full ({} seats)", section, occupancy.capacity());
            return Allocation::Full;
        }

        match self.selector.select(occupancy, rng) {
            // A selector may only hand out seats from the free pool
            Some(seat) if occupancy.in_range(seat) && !occupancy.contains(seat) => {
                debug!("Allocated seat {} in section {}", seat, section);
                Allocation::Seat(Placement::new(section, seat))
            }
            answer => {
                error!(
                    "Seat selector answered {:?} for section {} with {} free seats",
                    answer, section, occupancy.len()
                );
                Allocation::Rejected(answer)
            }
        }
    }
}

impl Default for SeatAllocator {
    fn default() -> Self {
        Self::new(Arc::new(RandomSeatSelector))
    }
}
