use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use mesa_core::{Interval, ProposedReservation, Reservation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateReservationRequest {
    /// Client-generated identity so a retried request cannot double-book.
    /// Generated server-side when omitted, at the cost of retry idempotence.
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    table_id: Option<Uuid>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    party_size: i32,
    event_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
struct UpdateReservationRequest {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    party_size: i32,
}

#[derive(Debug, Serialize)]
struct ReservationResponse {
    reservation: Reservation,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/reservations", post(create_reservation))
        .route(
            "/v1/reservations/{id}",
            put(update_reservation).delete(cancel_reservation),
        )
}

async fn create_reservation(
    State(state): State<AppState>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<Json<ReservationResponse>, AppError> {
    let proposed = ProposedReservation {
        id: req.id,
        table_id: req.table_id,
        interval: Interval::new(req.start, req.end)?,
        party_size: req.party_size,
        event_id: req.event_id,
    };

    let reservation = state.engine.commit(proposed).await?;
    Ok(Json(ReservationResponse { reservation }))
}

async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateReservationRequest>,
) -> Result<Json<ReservationResponse>, AppError> {
    let interval = Interval::new(req.start, req.end)?;
    let reservation = state.engine.reschedule(id, interval, req.party_size).await?;
    Ok(Json(ReservationResponse { reservation }))
}

async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state.engine.cancel(id).await?;
    Ok(Json(ReservationResponse { reservation }))
}
