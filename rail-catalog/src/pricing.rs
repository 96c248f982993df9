use rail_shared::Section;
use serde::{Deserialize, Serialize};

/// Fixed fare per section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Tariff {
    pub section_a: f64,
    pub section_b: f64,
}

impl Tariff {
    pub fn new(section_a: f64, section_b: f64) -> Self {
        Self { section_a, section_b }
    }

    pub fn price_of(&self, section: Section) -> f64 {
        match section {
            Section::A => self.section_a,
            Section::B => self.section_b,
        }
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self::new(50.0, 100.0)
    }
}
