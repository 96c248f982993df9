use rail_shared::{SeatNumber, Ticket, User};
use rail_store::app_config::BookingConfig;
use serde::{Deserialize, Serialize};

/// Tunables of the booking flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRules {
    /// Allocation rounds before a lost seat race is reported as an internal error
    pub commit_attempts: u32,
    /// Seed for section and seat selection; `None` draws from OS entropy
    pub rng_seed: Option<u64>,
}

impl BookingRules {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            ..Self::default()
        }
    }
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            commit_attempts: 8,
            rng_seed: None,
        }
    }
}

impl From<&BookingConfig> for BookingRules {
    fn from(config: &BookingConfig) -> Self {
        Self {
            commit_attempts: config.commit_attempts.max(1),
            rng_seed: config.rng_seed,
        }
    }
}

/// A ticket together with its purchaser
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receipt {
    pub ticket: Ticket,
    pub user: User,
}

/// One seated passenger in a section listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionOccupant {
    pub user_name: String,
    pub seat: SeatNumber,
}
