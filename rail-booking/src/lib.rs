pub mod models;
pub mod service;

pub use models::{BookingRules, Receipt, SectionOccupant};
pub use service::BookingService;
