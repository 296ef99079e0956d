use std::sync::Arc;

use chrono::NaiveDate;
use mesa_core::{
    EngineError, Interval, ProposedReservation, Reservation, ReservationStatus, ReservationStore,
    ScheduleConfig, Slot, Table, TableRepository,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::availability;

/// Attendance summary for one event.
#[derive(Debug, Clone, Serialize)]
pub struct AttendeeCount {
    pub current_attendees: i32,
    pub total_reservations: usize,
    pub max_attendees: i32,
}

/// Orchestrates the read path (availability) and the write path (commit,
/// reschedule, cancel) over injected collaborators.
///
/// Holds no locks and performs no blocking waits itself. Read-time
/// availability is advisory; the authoritative overlap and capacity checks
/// run inside the store's atomic commit, so a stale read can never turn
/// into a double-booking.
pub struct BookingEngine {
    schedule: ScheduleConfig,
    tables: Arc<dyn TableRepository>,
    store: Arc<dyn ReservationStore>,
}

impl BookingEngine {
    pub fn new(
        schedule: ScheduleConfig,
        tables: Arc<dyn TableRepository>,
        store: Arc<dyn ReservationStore>,
    ) -> Self {
        Self {
            schedule,
            tables,
            store,
        }
    }

    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    pub async fn list_tables(&self) -> Result<Vec<Table>, EngineError> {
        self.tables.list_tables().await
    }

    /// Candidate slots that can still seat `party_size` on `date`.
    pub async fn available_slots(
        &self,
        date: NaiveDate,
        party_size: i32,
    ) -> Result<Vec<Slot>, EngineError> {
        validate_party_size(party_size)?;

        let tables = self.tables.list_tables().await?;
        let reservations = self.store.list_reservations_for_date(date).await?;

        Ok(
            availability::available_slots(&self.schedule, &tables, &reservations, date, party_size)
                .collect(),
        )
    }

    /// Commit a proposed reservation. Validation failures are rejected
    /// before any lookup; conflicts come back typed from the store's atomic
    /// re-validation.
    pub async fn commit(&self, proposed: ProposedReservation) -> Result<Reservation, EngineError> {
        validate_party_size(proposed.party_size)?;
        validate_interval(&proposed.interval)?;

        let committed = self.store.commit_reservation(proposed, None).await?;
        info!(
            reservation_id = %committed.id,
            table_id = ?committed.table_id,
            party_size = committed.party_size,
            "reservation committed"
        );
        Ok(committed)
    }

    /// Reschedule or resize in place. Re-runs the identical overlap and
    /// capacity checks against the new interval/size, excluding the
    /// reservation itself, before applying.
    pub async fn reschedule(
        &self,
        id: Uuid,
        interval: Interval,
        party_size: i32,
    ) -> Result<Reservation, EngineError> {
        validate_party_size(party_size)?;
        validate_interval(&interval)?;

        let prior = self
            .store
            .get_reservation(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("reservation {id}")))?;
        if prior.status == ReservationStatus::Cancelled {
            return Err(EngineError::InvalidInput(format!(
                "reservation {id} is cancelled"
            )));
        }

        let proposed = ProposedReservation {
            id,
            table_id: None,
            interval,
            party_size,
            event_id: prior.event_id,
        };
        let updated = self.store.commit_reservation(proposed, Some(prior)).await?;
        info!(reservation_id = %updated.id, "reservation rescheduled");
        Ok(updated)
    }

    /// Cancel a reservation, immediately freeing its table interval and
    /// party size for subsequent availability and capacity checks.
    pub async fn cancel(&self, id: Uuid) -> Result<Reservation, EngineError> {
        let cancelled = self.store.cancel_reservation(id).await?;
        info!(reservation_id = %id, "reservation cancelled");
        Ok(cancelled)
    }

    /// Cancel an event, cascading to its reservations.
    pub async fn cancel_event(&self, event_id: Uuid) -> Result<usize, EngineError> {
        let freed = self.store.cancel_event(event_id).await?;
        info!(event_id = %event_id, cancelled_reservations = freed, "event cancelled");
        Ok(freed)
    }

    pub async fn attendee_count(&self, event_id: Uuid) -> Result<AttendeeCount, EngineError> {
        let event = self
            .store
            .get_event(event_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("event {event_id}")))?;
        let reservations = self.store.list_event_reservations(event_id).await?;

        Ok(AttendeeCount {
            current_attendees: reservations.iter().map(|r| r.party_size).sum(),
            total_reservations: reservations.len(),
            max_attendees: event.max_attendees,
        })
    }
}

fn validate_party_size(party_size: i32) -> Result<(), EngineError> {
    if party_size < 1 {
        return Err(EngineError::InvalidInput(format!(
            "party size must be at least 1, got {party_size}"
        )));
    }
    Ok(())
}

fn validate_interval(interval: &Interval) -> Result<(), EngineError> {
    // Re-validated here because Interval fields are public and a proposal
    // may have been assembled without the checked constructor.
    if !interval.is_well_formed() {
        return Err(EngineError::InvalidInput(format!(
            "interval end {} must be after start {}",
            interval.end, interval.start
        )));
    }
    Ok(())
}
