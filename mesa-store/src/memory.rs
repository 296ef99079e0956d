use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use mesa_booking::{check_event_capacity, find_free_table, table_is_free};
use mesa_core::{
    EngineError, Event, EventStatus, ProposedReservation, Reservation, ReservationStatus,
    ReservationStore, ScheduleConfig, Table, TableRepository,
};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct StoreInner {
    tables: Vec<Table>,
    reservations: HashMap<Uuid, Reservation>,
    events: HashMap<Uuid, Event>,
}

/// In-memory persistence collaborator.
///
/// One mutex guards tables, reservations and events together, so
/// `commit_reservation` runs its overlap re-check, capacity re-check and
/// write as a single atomic unit. That is the in-memory equivalent of the
/// serializable transaction a SQL store would use behind the same traits.
pub struct MemoryStore {
    schedule: ScheduleConfig,
    inner: Mutex<StoreInner>,
}

impl MemoryStore {
    pub fn new(schedule: ScheduleConfig) -> Self {
        Self {
            schedule,
            inner: Mutex::new(StoreInner::default()),
        }
    }

    pub async fn seed_tables(&self, tables: Vec<Table>) {
        let mut inner = self.inner.lock().await;
        inner.tables = tables;
    }

    pub async fn seed_event(&self, event: Event) {
        let mut inner = self.inner.lock().await;
        inner.events.insert(event.id, event);
    }

    fn service_date(&self, reservation: &Reservation) -> NaiveDate {
        reservation
            .interval
            .start
            .with_timezone(&self.schedule.business_offset())
            .date_naive()
    }
}

/// True when the stored row already reflects this exact proposal, i.e. the
/// commit is a retried duplicate rather than a reschedule.
fn already_applied(existing: &Reservation, proposed: &ProposedReservation) -> bool {
    existing.is_active()
        && existing.interval == proposed.interval
        && existing.party_size == proposed.party_size
        && existing.event_id == proposed.event_id
        && (proposed.table_id.is_none() || proposed.table_id == existing.table_id)
}

#[async_trait]
impl TableRepository for MemoryStore {
    async fn list_tables(&self) -> Result<Vec<Table>, EngineError> {
        let inner = self.inner.lock().await;
        Ok(inner.tables.clone())
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn list_reservations_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, EngineError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .reservations
            .values()
            .filter(|r| r.is_active() && self.service_date(r) == date)
            .cloned()
            .collect())
    }

    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>, EngineError> {
        let inner = self.inner.lock().await;
        Ok(inner.reservations.get(&id).cloned())
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>, EngineError> {
        let inner = self.inner.lock().await;
        Ok(inner.events.get(&event_id).cloned())
    }

    async fn list_event_reservations(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<Reservation>, EngineError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .reservations
            .values()
            .filter(|r| r.is_active() && r.event_id == Some(event_id))
            .cloned()
            .collect())
    }

    async fn commit_reservation(
        &self,
        proposed: ProposedReservation,
        expected_prior: Option<Reservation>,
    ) -> Result<Reservation, EngineError> {
        let mut inner = self.inner.lock().await;

        // Resolve the proposal against the current row for this identity.
        let created_at = match (inner.reservations.get(&proposed.id), &expected_prior) {
            // Retried commit of the same intent: one reservation, not two.
            (Some(existing), _) if already_applied(existing, &proposed) => {
                return Ok(existing.clone());
            }
            // Reschedule/resize: the caller's snapshot must still be current.
            (Some(existing), Some(prior))
                if existing.status == prior.status && existing.updated_at == prior.updated_at =>
            {
                Some(existing.created_at)
            }
            // Same identity, different contents, no (or stale) prior snapshot:
            // the caller acted on stale state and must re-query.
            (Some(existing), _) => {
                return Err(EngineError::SlotConflict {
                    table_id: existing.table_id,
                });
            }
            (None, Some(_)) => {
                return Err(EngineError::NotFound(format!(
                    "reservation {}",
                    proposed.id
                )));
            }
            (None, None) => None,
        };

        // Everything below happens under the same lock as the insert: the
        // re-validation and the write form one atomic unit.
        let others: Vec<Reservation> = inner
            .reservations
            .values()
            .filter(|r| r.id != proposed.id)
            .cloned()
            .collect();

        let table_id = match proposed.table_id {
            Some(requested) => {
                let table = inner
                    .tables
                    .iter()
                    .find(|t| t.id == requested)
                    .ok_or_else(|| EngineError::NotFound(format!("table {requested}")))?;
                if table.capacity < proposed.party_size {
                    return Err(EngineError::InvalidInput(format!(
                        "table {} seats {}, party of {} does not fit",
                        table.number, table.capacity, proposed.party_size
                    )));
                }
                if !table_is_free(requested, &others, &proposed.interval) {
                    return Err(EngineError::SlotConflict {
                        table_id: Some(requested),
                    });
                }
                requested
            }
            None => {
                find_free_table(
                    &inner.tables,
                    &others,
                    &proposed.interval,
                    proposed.party_size,
                )
                .ok_or(EngineError::SlotConflict { table_id: None })?
                .id
            }
        };

        if let Some(event_id) = proposed.event_id {
            let event = inner
                .events
                .get(&event_id)
                .ok_or_else(|| EngineError::NotFound(format!("event {event_id}")))?;
            if event.status == EventStatus::Cancelled {
                return Err(EngineError::InvalidInput(format!(
                    "event {event_id} is cancelled"
                )));
            }
            // `others` already excludes this reservation id.
            check_event_capacity(event, &others, proposed.party_size, None)?;
        }

        let mut reservation = proposed.into_reservation(table_id);
        if let Some(created_at) = created_at {
            reservation.created_at = created_at;
        }
        inner.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn cancel_reservation(&self, id: Uuid) -> Result<Reservation, EngineError> {
        let mut inner = self.inner.lock().await;
        let reservation = inner
            .reservations
            .get_mut(&id)
            .ok_or_else(|| EngineError::NotFound(format!("reservation {id}")))?;
        if reservation.is_active() {
            reservation.status = ReservationStatus::Cancelled;
            reservation.updated_at = Utc::now();
        }
        Ok(reservation.clone())
    }

    async fn cancel_event(&self, event_id: Uuid) -> Result<usize, EngineError> {
        let mut inner = self.inner.lock().await;
        let event = inner
            .events
            .get_mut(&event_id)
            .ok_or_else(|| EngineError::NotFound(format!("event {event_id}")))?;
        event.status = EventStatus::Cancelled;

        let now = Utc::now();
        let mut cancelled = 0;
        for reservation in inner.reservations.values_mut() {
            if reservation.event_id == Some(event_id) && reservation.is_active() {
                reservation.status = ReservationStatus::Cancelled;
                reservation.updated_at = now;
                cancelled += 1;
            }
        }
        Ok(cancelled)
    }
}
