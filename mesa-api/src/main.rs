use std::net::SocketAddr;
use std::sync::Arc;

use mesa_api::{app, AppState};
use mesa_booking::BookingEngine;
use mesa_store::MemoryStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mesa_api=debug,mesa_booking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = mesa_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Mesa API on port {}", config.server.port);

    let store = Arc::new(MemoryStore::new(config.schedule.clone()));

    let tables: Vec<_> = config
        .seed
        .tables
        .iter()
        .cloned()
        .map(|t| t.into_table())
        .collect();
    for table in &tables {
        tracing::info!(table_id = %table.id, number = table.number, capacity = table.capacity, "seeded table");
    }
    store.seed_tables(tables).await;

    for seed in config.seed.events.iter().cloned() {
        let event = seed.into_event();
        tracing::info!(event_id = %event.id, name = %event.name, max_attendees = event.max_attendees, "seeded event");
        store.seed_event(event).await;
    }

    let engine = Arc::new(BookingEngine::new(
        config.schedule.clone(),
        store.clone(),
        store.clone(),
    ));

    let app = app(AppState { engine });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
