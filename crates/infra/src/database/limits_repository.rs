//! Site limit collection implementation over SQLite
//!
//! Stored order is the enforcement tie-break order, kept in an explicit
//! `position` column (insertion order unless edited).

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::params;
use tabguard_core::ports::LimitsRepository;
use tabguard_domain::{Result, SiteLimit, SiteLimitPatch, TabGuardError};
use tokio::task;
use uuid::Uuid;

use super::{map_join_error, map_serde_error, map_sql_error, DbManager};

/// SQLite-backed implementation of [`LimitsRepository`].
pub struct SqliteLimitsRepository {
    db: Arc<DbManager>,
}

impl SqliteLimitsRepository {
    /// Create a new repository instance.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LimitsRepository for SqliteLimitsRepository {
    async fn add(&self, limit: SiteLimit) -> Result<()> {
        let db = Arc::clone(&self.db);
        let payload = serde_json::to_string(&limit).map_err(map_serde_error)?;

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO site_limits (id, position, payload)
                 VALUES (?1, (SELECT COALESCE(MAX(position), -1) + 1 FROM site_limits), ?2)",
                params![limit.id.to_string(), payload],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, id: Uuid, patch: SiteLimitPatch) -> Result<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            let result = conn.query_row(
                "SELECT payload FROM site_limits WHERE id = ?1",
                params![id.to_string()],
                |row| row.get::<_, String>(0),
            );
            let payload = match result {
                Ok(payload) => payload,
                Err(rusqlite::Error::QueryReturnedNoRows) => {
                    return Err(TabGuardError::NotFound(format!("site limit {id}")));
                }
                Err(err) => return Err(map_sql_error(err)),
            };

            let mut limit: SiteLimit =
                serde_json::from_str(&payload).map_err(map_serde_error)?;
            patch.apply_to(&mut limit);
            let payload = serde_json::to_string(&limit).map_err(map_serde_error)?;

            conn.execute(
                "UPDATE site_limits SET payload = ?2 WHERE id = ?1",
                params![id.to_string(), payload],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute("DELETE FROM site_limits WHERE id = ?1", params![id.to_string()])
                .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self) -> Result<Vec<SiteLimit>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<SiteLimit>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare("SELECT payload FROM site_limits ORDER BY position")
                .map_err(map_sql_error)?;
            let rows =
                stmt.query_map([], |row| row.get::<_, String>(0)).map_err(map_sql_error)?;

            let mut limits = Vec::new();
            for payload in rows {
                let payload = payload.map_err(map_sql_error)?;
                limits.push(serde_json::from_str(&payload).map_err(map_serde_error)?);
            }
            Ok(limits)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn replace_all(&self, limits: Vec<SiteLimit>) -> Result<()> {
        let db = Arc::clone(&self.db);
        let mut rows = Vec::with_capacity(limits.len());
        for (position, limit) in limits.iter().enumerate() {
            rows.push((
                limit.id.to_string(),
                position as i64,
                serde_json::to_string(limit).map_err(map_serde_error)?,
            ));
        }

        task::spawn_blocking(move || -> Result<()> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;
            tx.execute("DELETE FROM site_limits", []).map_err(map_sql_error)?;
            for (id, position, payload) in rows {
                tx.execute(
                    "INSERT INTO site_limits (id, position, payload) VALUES (?1, ?2, ?3)",
                    params![id, position, payload],
                )
                .map_err(map_sql_error)?;
            }
            tx.commit().map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}
