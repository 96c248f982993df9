pub mod inventory;
pub mod allocator;
pub mod pricing;

pub use inventory::{InventoryError, Occupancy, SeatingPlan};
pub use allocator::{Allocation, LowestFreeSeatSelector, RandomSeatSelector, SeatAllocator, SeatSelector, SeatStrategy};
pub use pricing::Tariff;
