use uuid::Uuid;

/// Shared error taxonomy for the reservation engine.
///
/// `NoEligibleResource` is deliberately absent: a party size no table can
/// seat yields an empty slot list, not an error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// Missing or malformed request data. Rejected before any lookup and
    /// never retried automatically.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Commit-time overlap on a table. The caller must re-query availability
    /// and pick a different slot; the engine never substitutes one silently.
    #[error("Requested slot is no longer available")]
    SlotConflict { table_id: Option<Uuid> },

    /// Event aggregate would exceed its attendee ceiling. Carries the ceiling
    /// so callers can render a precise message.
    #[error("Event capacity exceeded: {requested} requested, ceiling is {max_attendees}")]
    CapacityExceeded { requested: i32, max_attendees: i32 },

    /// Store timeout or connectivity fault. Safe to retry the whole commit
    /// with backoff; proposal identity keeps retries idempotent.
    #[error("Transient store failure: {0}")]
    TransientStoreFailure(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
