use axum::{extract::State, routing::get, Json, Router};
use mesa_core::Table;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct TablesResponse {
    tables: Vec<Table>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/tables", get(list_tables))
}

async fn list_tables(
    State(state): State<AppState>,
) -> Result<Json<TablesResponse>, AppError> {
    let tables = state.engine.list_tables().await?;
    Ok(Json(TablesResponse { tables }))
}
