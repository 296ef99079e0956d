pub mod availability;
pub mod capacity;
pub mod inventory;
pub mod transition;

pub use availability::{available_slots, find_free_table, table_is_free};
pub use capacity::check_event_capacity;
pub use inventory::eligible_tables;
pub use transition::{AttendeeCount, BookingEngine};
