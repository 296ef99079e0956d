pub mod error;
pub mod interval;
pub mod models;
pub mod repository;
pub mod schedule;

pub use error::{EngineError, EngineResult};
pub use interval::Interval;
pub use models::{
    Event, EventStatus, ProposedReservation, Reservation, ReservationStatus, Slot, Table,
};
pub use repository::{ReservationStore, TableRepository};
pub use schedule::ScheduleConfig;
