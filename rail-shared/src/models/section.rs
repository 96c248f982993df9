use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat number inside a section, counted from 1.
pub type SeatNumber = u32;

/// The two seating zones of a journey.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    A,
    B,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::A, Section::B];

    /// The section tried when this one is full.
    pub fn other(self) -> Section {
        match self {
            Section::A => Section::B,
            Section::B => Section::A,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::A => write!(f, "A"),
            Section::B => write!(f, "B"),
        }
    }
}

/// A concrete seat: section plus seat number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Placement {
    pub section: Section,
    pub seat: SeatNumber,
}

impl Placement {
    pub fn new(section: Section, seat: SeatNumber) -> Self {
        Self { section, seat }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.section, self.seat)
    }
}
