//! Stats store implementation over the SQLite record tables

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::params;
use tabguard_core::ports::StatsStore;
use tabguard_domain::{ActivityLog, DailyStats, Result};
use tokio::task;

use super::{map_join_error, map_serde_error, map_sql_error, DbManager};

/// SQLite-backed implementation of [`StatsStore`].
pub struct SqliteStatsStore {
    db: Arc<DbManager>,
}

impl SqliteStatsStore {
    /// Create a new store instance.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatsStore for SqliteStatsStore {
    async fn get_daily_stats(&self, date: NaiveDate) -> Result<Option<DailyStats>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Option<DailyStats>> {
            let conn = db.get_connection()?;
            let result = conn.query_row(
                "SELECT payload FROM daily_stats WHERE date = ?1",
                params![date.to_string()],
                |row| row.get::<_, String>(0),
            );
            match result {
                Ok(payload) => {
                    Ok(Some(serde_json::from_str(&payload).map_err(map_serde_error)?))
                }
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save_daily_stats(&self, stats: &DailyStats) -> Result<()> {
        let db = Arc::clone(&self.db);
        let date = stats.date.to_string();
        let payload = serde_json::to_string(stats).map_err(map_serde_error)?;

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO daily_stats (date, payload) VALUES (?1, ?2)
                 ON CONFLICT(date) DO UPDATE SET payload = excluded.payload",
                params![date, payload],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn append_activity_log(&self, entry: ActivityLog) -> Result<()> {
        let db = Arc::clone(&self.db);
        let payload = serde_json::to_string(&entry).map_err(map_serde_error)?;

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO activity_logs (id, date, domain, payload) VALUES (?1, ?2, ?3, ?4)",
                params![entry.id.to_string(), entry.date.to_string(), entry.domain, payload],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn activity_logs_for_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ActivityLog>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<ActivityLog>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(
                    "SELECT payload FROM activity_logs
                     WHERE date >= ?1 AND date <= ?2
                     ORDER BY date, rowid",
                )
                .map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params![from.to_string(), to.to_string()], |row| {
                    row.get::<_, String>(0)
                })
                .map_err(map_sql_error)?;

            let mut logs = Vec::new();
            for payload in rows {
                let payload = payload.map_err(map_sql_error)?;
                logs.push(serde_json::from_str(&payload).map_err(map_serde_error)?);
            }
            Ok(logs)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn all_activity_logs(&self) -> Result<Vec<ActivityLog>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<ActivityLog>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare("SELECT payload FROM activity_logs ORDER BY date, rowid")
                .map_err(map_sql_error)?;
            let rows =
                stmt.query_map([], |row| row.get::<_, String>(0)).map_err(map_sql_error)?;

            let mut logs = Vec::new();
            for payload in rows {
                let payload = payload.map_err(map_sql_error)?;
                logs.push(serde_json::from_str(&payload).map_err(map_serde_error)?);
            }
            Ok(logs)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn replace_activity_logs(&self, entries: Vec<ActivityLog>) -> Result<()> {
        let db = Arc::clone(&self.db);
        let mut rows = Vec::with_capacity(entries.len());
        for entry in &entries {
            rows.push((
                entry.id.to_string(),
                entry.date.to_string(),
                entry.domain.clone(),
                serde_json::to_string(entry).map_err(map_serde_error)?,
            ));
        }

        task::spawn_blocking(move || -> Result<()> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;
            tx.execute("DELETE FROM activity_logs", []).map_err(map_sql_error)?;
            for (id, date, domain, payload) in rows {
                tx.execute(
                    "INSERT INTO activity_logs (id, date, domain, payload) VALUES (?1, ?2, ?3, ?4)",
                    params![id, date, domain, payload],
                )
                .map_err(map_sql_error)?;
            }
            tx.commit().map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn purge_older_than(&self, cutoff: NaiveDate) -> Result<usize> {
        let db = Arc::clone(&self.db);
        let cutoff = cutoff.to_string();

        task::spawn_blocking(move || -> Result<usize> {
            // ISO date strings compare lexicographically in date order.
            let conn = db.get_connection()?;
            let stats = conn
                .execute("DELETE FROM daily_stats WHERE date < ?1", params![cutoff])
                .map_err(map_sql_error)?;
            let logs = conn
                .execute("DELETE FROM activity_logs WHERE date < ?1", params![cutoff])
                .map_err(map_sql_error)?;
            Ok(stats + logs)
        })
        .await
        .map_err(map_join_error)?
    }
}
