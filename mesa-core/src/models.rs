use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interval::Interval;

/// A bookable table with fixed seating capacity. Inventory is read-only to
/// the engine for the duration of a booking decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: Uuid,
    pub number: i32,
    pub capacity: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

/// A committed booking. Treated as an immutable snapshot at decision time;
/// mutated only through the store's atomic commit path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    /// None until a table has been assigned at commit time.
    pub table_id: Option<Uuid>,
    pub interval: Interval,
    pub party_size: i32,
    pub event_id: Option<Uuid>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Cancelled rows never count toward overlap or capacity accounting.
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Active,
    Cancelled,
}

/// Aggregation point for RSVPs sharing one attendee ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    /// 0 means unlimited.
    pub max_attendees: i32,
    pub status: EventStatus,
}

/// Pre-validated booking intent. Never persisted as-is; the id is
/// client-generated so a retried commit lands on the same reservation
/// instead of double-booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedReservation {
    pub id: Uuid,
    /// None asks the engine to assign the first eligible free table.
    pub table_id: Option<Uuid>,
    pub interval: Interval,
    pub party_size: i32,
    pub event_id: Option<Uuid>,
}

impl ProposedReservation {
    /// Materialize as a committed reservation on `table_id`.
    pub fn into_reservation(self, table_id: Uuid) -> Reservation {
        let now = Utc::now();
        Reservation {
            id: self.id,
            table_id: Some(table_id),
            interval: self.interval,
            party_size: self.party_size,
            event_id: self.event_id,
            status: ReservationStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Candidate start time plus implied duration. Computed on demand, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl Slot {
    pub fn interval(&self) -> Interval {
        Interval {
            start: self.starts_at,
            end: self.starts_at + chrono::Duration::minutes(self.duration_minutes),
        }
    }
}
