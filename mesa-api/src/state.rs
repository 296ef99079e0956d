use std::sync::Arc;

use mesa_booking::BookingEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<BookingEngine>,
}
