use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod events;
pub mod reservations;
pub mod slots;
pub mod state;
pub mod tables;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .merge(slots::routes())
        .merge(reservations::routes())
        .merge(events::routes())
        .merge(tables::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
