use rail_shared::{SeatNumber, Section};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Seat capacity of each section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatingPlan {
    pub section_a: u32,
    pub section_b: u32,
}

impl SeatingPlan {
    pub fn new(section_a: u32, section_b: u32) -> Self {
        Self { section_a, section_b }
    }

    /// Same capacity in both sections
    pub fn uniform(capacity: u32) -> Self {
        Self::new(capacity, capacity)
    }

    pub fn capacity(&self, section: Section) -> u32 {
        match section {
            Section::A => self.section_a,
            Section::B => self.section_b,
        }
    }

    pub fn total_capacity(&self) -> u32 {
        self.section_a + self.section_b
    }
}

impl Default for SeatingPlan {
    fn default() -> Self {
        Self::uniform(50)
    }
}

/// Occupied seats of one section, kept together with an index of the free ones.
///
/// The free pool is a dense vector plus a position map, so reserving or releasing a
/// seat is O(1) and a uniformly random free seat can be drawn without probing
/// occupied numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    capacity: u32,
    free: Vec<SeatNumber>,
    free_slots: HashMap<SeatNumber, usize>,
}

impl Occupancy {
    /// Empty section with seats `1..=capacity`
    pub fn new(capacity: u32) -> Self {
        let free: Vec<SeatNumber> = (1..=capacity).collect();
        let free_slots = free.iter().enumerate().map(|(slot, seat)| (*seat, slot)).collect();
        Self { capacity, free, free_slots }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of occupied seats
    pub fn len(&self) -> usize {
        self.capacity as usize - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.len() == self.capacity as usize
    }

    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    pub fn in_range(&self, seat: SeatNumber) -> bool {
        (1..=self.capacity).contains(&seat)
    }

    pub fn contains(&self, seat: SeatNumber) -> bool {
        self.in_range(seat) && !self.free_slots.contains_key(&seat)
    }

    /// Free seats in pool order (not sorted)
    pub fn free_seats(&self) -> &[SeatNumber] {
        &self.free
    }

    /// Occupied seats in ascending order
    pub fn occupied_seats(&self) -> Vec<SeatNumber> {
        (1..=self.capacity).filter(|seat| self.contains(*seat)).collect()
    }

    /// Mark a seat as taken
    pub fn reserve(&mut self, seat: SeatNumber) -> Result<(), InventoryError> {
        if !self.in_range(seat) {
            return Err(InventoryError::OutOfRange {
                seat,
                capacity: self.capacity,
            });
        }

        let slot = self.free_slots.remove(&seat)
            .ok_or(InventoryError::AlreadyOccupied(seat))?;

        self.free.swap_remove(slot);
        if let Some(moved) = self.free.get(slot) {
            self.free_slots.insert(*moved, slot);
        }

        Ok(())
    }

    /// Return a seat to the free pool. Returns false if it was not occupied.
    pub fn release(&mut self, seat: SeatNumber) -> bool {
        if !self.contains(seat) {
            return false;
        }

        self.free_slots.insert(seat, self.free.len());
        self.free.push(seat);
        true
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Seat {seat} is outside 1..={capacity}")]
    OutOfRange {
        seat: SeatNumber,
        capacity: u32,
    },

    #[error("Seat {0} is already occupied")]
    AlreadyOccupied(SeatNumber),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_occupancy_lifecycle() {
        let mut occupancy = Occupancy::new(3);
        assert!(occupancy.is_empty());

        // Reserve
        occupancy.reserve(2).unwrap();
        assert_eq!(occupancy.len(), 1);
        assert!(occupancy.contains(2));
        assert!(!occupancy.contains(1));

        // Double booking is refused
        assert_eq!(occupancy.reserve(2), Err(InventoryError::AlreadyOccupied(2)));

        // Fill up
        occupancy.reserve(1).unwrap();
        occupancy.reserve(3).unwrap();
        assert!(occupancy.is_full());
        assert_eq!(occupancy.occupied_seats(), vec![1, 2, 3]);

        // Release
        assert!(occupancy.release(2));
        assert!(!occupancy.release(2));
        assert_eq!(occupancy.free_seats(), &[2]);
        assert_eq!(occupancy.len(), 2);
    }

    #[test]
    fn test_out_of_range_seats() {
        let mut occupancy = Occupancy::new(2);
        assert_eq!(
            occupancy.reserve(0),
            Err(InventoryError::OutOfRange { seat: 0, capacity: 2 })
        );
        assert_eq!(
            occupancy.reserve(3),
            Err(InventoryError::OutOfRange { seat: 3, capacity: 2 })
        );
        assert!(!occupancy.release(3));
        assert!(!occupancy.contains(0));
    }

    #[test]
    fn test_seating_plan_capacity() {
        let plan = SeatingPlan::new(2, 5);
        assert_eq!(plan.capacity(Section::A), 2);
        assert_eq!(plan.capacity(Section::B), 5);
        assert_eq!(plan.total_capacity(), 7);
        assert_eq!(SeatingPlan::default().capacity(Section::B), 50);
    }

    proptest! {
        #[test]
        fn test_occupancy_index_stays_consistent(
            capacity in 1u32..40,
            ops in prop::collection::vec((any::<bool>(), 0u32..45), 0..200),
        ) {
            let mut occupancy = Occupancy::new(capacity);
            let mut model = std::collections::BTreeSet::new();

            for (reserve, seat) in ops {
                if reserve {
                    let accepted = occupancy.reserve(seat).is_ok();
                    let expected = (1..=capacity).contains(&seat) && !model.contains(&seat);
                    prop_assert_eq!(accepted, expected);
                    if accepted {
                        model.insert(seat);
                    }
                } else {
                    prop_assert_eq!(occupancy.release(seat), model.remove(&seat));
                }

                prop_assert!(occupancy.len() <= capacity as usize);
                prop_assert_eq!(occupancy.len(), model.len());
                prop_assert_eq!(occupancy.free_seats().len() + model.len(), capacity as usize);
            }

            let occupied: Vec<SeatNumber> = model.into_iter().collect();
            prop_assert_eq!(occupancy.occupied_seats(), occupied);
        }
    }
}
