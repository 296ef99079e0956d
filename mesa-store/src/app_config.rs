use mesa_core::{Event, EventStatus, ScheduleConfig, Table};
use serde::Deserialize;
use std::env;
use uuid::Uuid;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Inventory and events loaded at startup. Stands in for whatever system of
/// record owns tables and events in a full deployment.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    #[serde(default)]
    pub tables: Vec<SeedTable>,
    #[serde(default)]
    pub events: Vec<SeedEvent>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedTable {
    pub number: i32,
    pub capacity: i32,
}

impl SeedTable {
    pub fn into_table(self) -> Table {
        Table {
            id: Uuid::new_v4(),
            number: self.number,
            capacity: self.capacity,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedEvent {
    pub name: String,
    /// 0 means unlimited.
    #[serde(default)]
    pub max_attendees: i32,
}

impl SeedEvent {
    pub fn into_event(self) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: self.name,
            max_attendees: self.max_attendees,
            status: EventStatus::Active,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `MESA__SERVER__PORT=9000` overrides server.port
            .add_source(config::Environment::with_prefix("MESA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
