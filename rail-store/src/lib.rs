pub mod app_config;
pub mod ticket_store;
pub mod user_registry;

pub use ticket_store::TicketStore;
pub use user_registry::UserRegistry;
