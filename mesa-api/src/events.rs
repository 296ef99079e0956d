use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use mesa_booking::AttendeeCount;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct CancelEventResponse {
    cancelled_reservations: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/events/{id}/attendees", get(attendee_count))
        .route("/v1/events/{id}", delete(cancel_event))
}

async fn attendee_count(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AttendeeCount>, AppError> {
    let count = state.engine.attendee_count(id).await?;
    Ok(Json(count))
}

async fn cancel_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CancelEventResponse>, AppError> {
    let cancelled_reservations = state.engine.cancel_event(id).await?;
    Ok(Json(CancelEventResponse {
        cancelled_reservations,
    }))
}
