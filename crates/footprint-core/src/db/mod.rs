//! Database access layer with connection pooling and migrations
//!
//! One domain table: `action_logs`, the append-only log of everything the
//! user reports doing. Summaries and trends are derived views computed by
//! the engines, never stored.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;

mod actions;
#[cfg(test)]
mod tests;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
    /// Owning directory for throwaway databases. Removed with its contents
    /// when the last clone drops; declared after the pool so connections
    /// close first.
    _temp_dir: Option<Arc<tempfile::TempDir>>,
}

impl Database {
    /// Create a new database connection pool and run migrations
    pub fn new(path: &str) -> Result<Self> {
        Self::open(path, None)
    }

    fn open(path: &str, temp_dir: Option<Arc<tempfile::TempDir>>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
            _temp_dir: temp_dir,
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because pooled
    /// connections would each get their own private in-memory database.
    /// The file lives in its own temp directory, deleted on drop.
    pub fn in_memory() -> Result<Self> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("footprint.db");

        Self::open(&path.to_string_lossy(), Some(Arc::new(dir)))
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Delete every logged action
    pub fn clear_actions(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch("DELETE FROM action_logs;")?;
        info!("Action log cleared");
        Ok(())
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            -- WAL mode: readers don't block writers
            PRAGMA journal_mode = WAL;
            PRAGMA cache_size = 2000;

            CREATE TABLE IF NOT EXISTS action_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                item_key TEXT NOT NULL,
                amount REAL NOT NULL,
                time_of_day TEXT,
                notes TEXT,
                co2e_kg REAL NOT NULL DEFAULT 0,
                water_l REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX IF NOT EXISTS idx_action_logs_date ON action_logs(date);
            "#,
        )?;

        Ok(())
    }
}
