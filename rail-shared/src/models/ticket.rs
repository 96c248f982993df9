use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use super::section::{Placement, SeatNumber, Section};

/// Journey endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Journey {
    pub from: String,
    pub to: String,
}

/// A booking binding a user, a journey and a seat
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: Uuid,
    /// Purchaser; the registry owns the record
    pub user_id: Uuid,
    pub price: f64,
    pub section: Section,
    pub seat: SeatNumber,
    pub source: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(user_id: Uuid, price: f64, placement: Placement, journey: &Journey) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            price,
            section: placement.section,
            seat: placement.seat,
            source: journey.from.clone(),
            destination: journey.to.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn placement(&self) -> Placement {
        Placement::new(self.section, self.seat)
    }

    /// Move the ticket to another seat
    pub fn reseat(&mut self, placement: Placement) {
        self.section = placement.section;
        self.seat = placement.seat;
        self.updated_at = Utc::now();
    }
}
