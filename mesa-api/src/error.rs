use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mesa_core::EngineError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    Engine(EngineError),
    Internal(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Engine(err) => match &err {
                EngineError::InvalidInput(_) => (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": err.to_string(), "kind": "INVALID_INPUT" }),
                ),
                EngineError::NotFound(_) => (
                    StatusCode::NOT_FOUND,
                    json!({ "error": err.to_string(), "kind": "NOT_FOUND" }),
                ),
                EngineError::SlotConflict { .. } => (
                    StatusCode::CONFLICT,
                    json!({ "error": err.to_string(), "kind": "SLOT_CONFLICT" }),
                ),
                // The ceiling rides along so the client can show a precise
                // "only N seats left" message.
                EngineError::CapacityExceeded { max_attendees, .. } => (
                    StatusCode::CONFLICT,
                    json!({
                        "error": err.to_string(),
                        "kind": "CAPACITY_EXCEEDED",
                        "max_attendees": max_attendees,
                    }),
                ),
                EngineError::TransientStoreFailure(_) => {
                    tracing::error!("Transient store failure: {}", err);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        json!({
                            "error": err.to_string(),
                            "kind": "TRANSIENT_STORE_FAILURE",
                            "retryable": true,
                        }),
                    )
                }
            },
            AppError::Internal(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
