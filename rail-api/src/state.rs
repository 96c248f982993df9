use std::sync::Arc;
use rail_booking::BookingService;

#[derive(Clone)]
pub struct AppState {
    pub booking: Arc<BookingService>,
}

impl AppState {
    pub fn new(booking: Arc<BookingService>) -> Self {
        Self { booking }
    }
}
