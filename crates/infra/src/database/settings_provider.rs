//! Settings record implementation over SQLite

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::params;
use tabguard_core::ports::SettingsProvider;
use tabguard_domain::{Result, TrackerSettings};
use tokio::task;

use super::{map_join_error, map_serde_error, map_sql_error, DbManager};

const SETTINGS_KEY: &str = "settings";

/// SQLite-backed implementation of [`SettingsProvider`]. A fresh profile
/// with no stored record yields [`TrackerSettings::default`].
pub struct SqliteSettingsProvider {
    db: Arc<DbManager>,
}

impl SqliteSettingsProvider {
    /// Create a new provider instance.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsProvider for SqliteSettingsProvider {
    async fn get(&self) -> Result<TrackerSettings> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<TrackerSettings> {
            let conn = db.get_connection()?;
            let result = conn.query_row(
                "SELECT payload FROM settings WHERE key = ?1",
                params![SETTINGS_KEY],
                |row| row.get::<_, String>(0),
            );
            match result {
                Ok(payload) => serde_json::from_str(&payload).map_err(map_serde_error),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(TrackerSettings::default()),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save(&self, settings: &TrackerSettings) -> Result<()> {
        let db = Arc::clone(&self.db);
        let payload = serde_json::to_string(settings).map_err(map_serde_error)?;

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO settings (key, payload) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET payload = excluded.payload",
                params![SETTINGS_KEY, payload],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}
