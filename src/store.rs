use crate::error::BotError;
use crate::types::{FavoriteEntry, HistoryEntry, PopularEntry};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;
use tokio::sync::Mutex;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS search_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    query TEXT NOT NULL,
    file_type TEXT,
    results_count INTEGER,
    search_time TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS user_favorites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    resource_title TEXT NOT NULL,
    resource_info TEXT,
    add_time TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS popular_searches (
    query TEXT PRIMARY KEY,
    search_count INTEGER DEFAULT 1,
    last_search TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
"#;

/// Durable per-user state: search history, favorites, and popular-search
/// counters. Three independent tables, no joins, no cross-table
/// transactions. The connection is guarded by a mutex so the host may
/// dispatch messages concurrently.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (or creates) the database and applies the schema idempotently.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {}", path.display()))?;
        conn.execute_batch(SCHEMA_SQL)
            .context("failed to initialize database schema")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Appends one search-history row; the timestamp is server-assigned.
    pub async fn record_search(
        &self,
        user_id: &str,
        query: &str,
        file_type: &str,
        results_count: usize,
    ) -> Result<(), BotError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO search_history (user_id, query, file_type, results_count)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, query, file_type, results_count as i64],
        )?;
        Ok(())
    }

    pub async fn add_favorite(
        &self,
        user_id: &str,
        resource_title: &str,
        resource_info: &str,
    ) -> Result<(), BotError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO user_favorites (user_id, resource_title, resource_info)
             VALUES (?1, ?2, ?3)",
            params![user_id, resource_title, resource_info],
        )?;
        Ok(())
    }

    /// Upsert keyed by exact query text: first search inserts with count 1,
    /// repeats increment the count and refresh the timestamp.
    pub async fn bump_popular(&self, query: &str) -> Result<(), BotError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO popular_searches (query, search_count, last_search)
             VALUES (?1, 1, CURRENT_TIMESTAMP)
             ON CONFLICT(query) DO UPDATE SET
             search_count = search_count + 1,
             last_search = CURRENT_TIMESTAMP",
            params![query],
        )?;
        Ok(())
    }

    /// Most recent 10 searches for a user, newest first.
    pub async fn history_for(&self, user_id: &str) -> Result<Vec<HistoryEntry>, BotError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT query, file_type, results_count, search_time
             FROM search_history
             WHERE user_id = ?1
             ORDER BY search_time DESC, id DESC
             LIMIT 10",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(HistoryEntry {
                query: row.get(0)?,
                file_type: row.get(1)?,
                results_count: row.get(2)?,
                search_time: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Most recent 20 favorites for a user, newest first.
    pub async fn favorites_for(&self, user_id: &str) -> Result<Vec<FavoriteEntry>, BotError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT resource_title, resource_info, add_time
             FROM user_favorites
             WHERE user_id = ?1
             ORDER BY add_time DESC, id DESC
             LIMIT 20",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(FavoriteEntry {
                resource_title: row.get(0)?,
                resource_info: row.get(1)?,
                add_time: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Top 10 queries searched within the last 7 days, by count descending.
    pub async fn popular(&self) -> Result<Vec<PopularEntry>, BotError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT query, search_count, last_search
             FROM popular_searches
             WHERE last_search > datetime('now', '-7 days')
             ORDER BY search_count DESC
             LIMIT 10",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PopularEntry {
                query: row.get(0)?,
                search_count: row.get(1)?,
                last_search: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
