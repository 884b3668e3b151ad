//! SQLite-backed record stores
//!
//! The core treats persistence as an opaque structured-record store, so
//! records are stored as JSON payloads in narrow tables keyed the way the
//! core queries them (date, id, collection position). All database work
//! runs on the blocking pool.

mod limits_repository;
mod manager;
mod settings_provider;
mod stats_store;

pub use limits_repository::SqliteLimitsRepository;
pub use manager::DbManager;
pub use settings_provider::SqliteSettingsProvider;
pub use stats_store::SqliteStatsStore;

use tabguard_domain::TabGuardError;

pub(crate) fn map_sql_error(err: rusqlite::Error) -> TabGuardError {
    TabGuardError::Storage(err.to_string())
}

pub(crate) fn map_pool_error(err: r2d2::Error) -> TabGuardError {
    TabGuardError::Storage(err.to_string())
}

pub(crate) fn map_join_error(err: tokio::task::JoinError) -> TabGuardError {
    TabGuardError::Internal(format!("blocking task failed: {err}"))
}

pub(crate) fn map_serde_error(err: serde_json::Error) -> TabGuardError {
    TabGuardError::Storage(format!("record serialization failed: {err}"))
}
