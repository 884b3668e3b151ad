//! # TabGuard Infra
//!
//! Infrastructure adapters behind the core's port traits:
//! - SQLite-backed record stores (rusqlite over an r2d2 pool)
//! - Configuration loading (environment variables, then config files)
//! - Tick and maintenance scheduling (tokio interval + cron jobs)
//! - The system clock

pub mod clock;
pub mod config;
pub mod database;
pub mod scheduling;

pub use clock::SystemClock;
pub use database::{
    DbManager, SqliteLimitsRepository, SqliteSettingsProvider, SqliteStatsStore,
};
pub use scheduling::{MaintenanceScheduler, SchedulerError, SchedulerResult, TickDriver};
