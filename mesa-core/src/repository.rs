use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{Event, ProposedReservation, Reservation, Table};

/// Read-only access to the table inventory.
#[async_trait]
pub trait TableRepository: Send + Sync {
    async fn list_tables(&self) -> Result<Vec<Table>, EngineError>;
}

/// Transactional access to reservation state, owned by the persistence
/// collaborator. Reads are snapshot-consistent; correctness rests on
/// `commit_reservation` executing its re-validation and write as one atomic
/// unit (serializable transaction or equivalent compare-and-set).
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Active reservations whose seating falls on `date` in the business
    /// timezone. Cancelled rows are excluded.
    async fn list_reservations_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, EngineError>;

    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>, EngineError>;

    async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>, EngineError>;

    /// Active reservations attached to an event.
    async fn list_event_reservations(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<Reservation>, EngineError>;

    /// Atomic compare-and-commit. Inside one critical section the store
    /// re-runs the single-slot overlap check (assigning the first eligible
    /// free table when none was requested) and the event capacity guard,
    /// then persists. Committing the same proposal identity twice returns
    /// the existing reservation; the same identity with new contents is a
    /// reschedule/resize and must carry the caller's `expected_prior`
    /// snapshot, failing as a conflict when that snapshot is stale.
    async fn commit_reservation(
        &self,
        proposed: ProposedReservation,
        expected_prior: Option<Reservation>,
    ) -> Result<Reservation, EngineError>;

    /// Flip to cancelled, immediately freeing the table interval and the
    /// party size for subsequent availability and capacity checks.
    async fn cancel_reservation(&self, id: Uuid) -> Result<Reservation, EngineError>;

    /// Cancel an event and cascade to its active reservations. Returns the
    /// number of reservations cancelled.
    async fn cancel_event(&self, event_id: Uuid) -> Result<usize, EngineError>;
}
